//! Typed load/save of named collections over a [`KeyValueStore`].
//!
//! Loading never fails: a missing key, an unreadable backend or a value that
//! does not parse as the expected structure all yield the caller's default.
//! Malformed data is logged and otherwise ignored, so a corrupted file can
//! never stop the plugin from starting. Saving serializes the whole value and
//! overwrites the key on every call; there is no write batching.

use crate::domain::error::Result;
use crate::storage::backend::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key of the favourites collection.
pub const FAVOURITES_KEY: &str = "book-favourites";

/// Storage key of the recent-search list.
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

/// Persisted collection store shared by the favourites and recent-search
/// components.
///
/// # Examples
///
/// ```
/// use bookfinder::storage::{CollectionStore, MemoryStore};
///
/// let mut store = CollectionStore::new(Box::new(MemoryStore::default()));
/// store.save("recentSearches", &vec!["dune".to_string()])?;
///
/// let recent: Vec<String> = store.load("recentSearches", Vec::new());
/// assert_eq!(recent, vec!["dune"]);
/// # Ok::<(), bookfinder::BookfinderError>(())
/// ```
pub struct CollectionStore {
    backend: Box<dyn KeyValueStore>,
}

impl CollectionStore {
    /// Wraps a key-value backend.
    #[must_use]
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Loads the value stored under `key`, or `default`.
    ///
    /// # Parameters
    ///
    /// * `key` - Storage key, e.g. [`FAVOURITES_KEY`]
    /// * `default` - Value returned when nothing usable is stored
    ///
    /// # Returns
    ///
    /// The parsed value, or `default` when the key is missing, the backend
    /// cannot be read, or the stored text is not a `T`. Read failures are
    /// logged at warn level, parse failures at debug level.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookfinder::storage::{CollectionStore, MemoryStore, RECENT_SEARCHES_KEY};
    ///
    /// let backend = MemoryStore::with_entries([(RECENT_SEARCHES_KEY, "{ truncated")]);
    /// let store = CollectionStore::new(Box::new(backend));
    ///
    /// let recent: Vec<String> = store.load(RECENT_SEARCHES_KEY, Vec::new());
    /// assert!(recent.is_empty());
    /// ```
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let _span = tracing::debug_span!("collection_load", key = %key).entered();

        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("no persisted value, using default");
                return default;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read persisted value, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(error = %e, "persisted value is malformed, using default");
                default
            }
        }
    }

    /// Serializes `value` and writes it under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let _span = tracing::debug_span!("collection_save", key = %key).entered();

        let json = serde_json::to_string(value)?;
        self.backend.set(key, &json)
    }
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::BookfinderError;
    use crate::storage::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(BookfinderError::Storage("disk on fire".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(BookfinderError::Storage("disk on fire".to_string()))
        }
    }

    #[test]
    fn missing_key_yields_default() {
        let store = CollectionStore::new(Box::new(MemoryStore::default()));
        let value: Vec<String> = store.load(RECENT_SEARCHES_KEY, vec!["x".to_string()]);
        assert_eq!(value, vec!["x"]);
    }

    #[test]
    fn malformed_value_yields_default() {
        let backend = MemoryStore::with_entries([(FAVOURITES_KEY, "{not json")]);
        let store = CollectionStore::new(Box::new(backend));
        let value: Vec<String> = store.load(FAVOURITES_KEY, Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn wrong_shape_yields_default() {
        let backend = MemoryStore::with_entries([(RECENT_SEARCHES_KEY, r#"{"a": 1}"#)]);
        let store = CollectionStore::new(Box::new(backend));
        let value: Vec<String> = store.load(RECENT_SEARCHES_KEY, Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn read_failure_yields_default() {
        let store = CollectionStore::new(Box::new(BrokenStore));
        let value: Vec<String> = store.load(RECENT_SEARCHES_KEY, Vec::new());
        assert!(value.is_empty());
    }

    #[test]
    fn save_overwrites_previous_value() {
        let mut store = CollectionStore::new(Box::new(MemoryStore::default()));
        store.save(RECENT_SEARCHES_KEY, &["a"]).unwrap();
        store.save(RECENT_SEARCHES_KEY, &["b", "a"]).unwrap();

        let value: Vec<String> = store.load(RECENT_SEARCHES_KEY, Vec::new());
        assert_eq!(value, vec!["b", "a"]);
    }

    #[test]
    fn save_propagates_backend_failure() {
        let mut store = CollectionStore::new(Box::new(BrokenStore));
        assert!(store.save(RECENT_SEARCHES_KEY, &["a"]).is_err());
    }
}
