//! Storage backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait: a synchronous, string-keyed
//! get/set store holding serialized values. The plugin persists exactly two
//! collections through it (favourites and recent searches), each under its own
//! fixed key. Typed access lives one level up in
//! [`CollectionStore`](crate::storage::CollectionStore).
//!
//! # Implementations
//!
//! - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON file per key
//! - [`MemoryStore`](crate::storage::MemoryStore): in-process map

use crate::domain::error::Result;

/// Synchronous string-keyed store of serialized values.
///
/// # Examples
///
/// ```
/// use bookfinder::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("recentSearches", r#"["dune"]"#)?;
/// assert_eq!(store.get("recentSearches")?.as_deref(), Some(r#"["dune"]"#));
/// assert_eq!(store.get("missing")?, None);
/// # Ok::<(), bookfinder::BookfinderError>(())
/// ```
pub trait KeyValueStore {
    /// Reads the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored under the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any prior value.
    ///
    /// The value is durable once this returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}
