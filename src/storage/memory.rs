//! In-memory key-value store.

use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;

/// `HashMap`-backed [`KeyValueStore`].
///
/// Used before the plugin has been granted disk access and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates a store pre-populated with `entries`.
    ///
    /// # Parameters
    ///
    /// * `entries` - `(key, raw value)` pairs; later duplicates win
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookfinder::storage::{KeyValueStore, MemoryStore};
    ///
    /// let store = MemoryStore::with_entries([("book-favourites", "[]")]);
    /// assert_eq!(store.get("book-favourites")?.as_deref(), Some("[]"));
    /// # Ok::<(), bookfinder::BookfinderError>(())
    /// ```
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
