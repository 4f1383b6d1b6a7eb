//! JSON file-based storage backend.
//!
//! Every key maps to its own file `<data_dir>/<key>.json`, so the favourites
//! and recent-search collections never rewrite each other. Writes go to a
//! temporary file which is then renamed over the target, leaving either the
//! old or the new value on disk after a crash.
//!
//! # File Layout
//!
//! ```text
//! /host/.local/share/zellij/bookfinder/
//! ├── book-favourites.json   [{"id": "...", "volumeInfo": {...}}, ...]
//! └── recentSearches.json    ["dune", "le guin", ...]
//! ```

use crate::domain::error::{BookfinderError, Result};
use crate::storage::backend::KeyValueStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory-backed [`KeyValueStore`] writing one JSON file per key.
///
/// # Examples
///
/// ```no_run
/// use bookfinder::storage::{JsonFileStore, KeyValueStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonFileStore::new(PathBuf::from("/tmp/bookfinder"))?;
/// store.set("recentSearches", "[]")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Directory holding one file per key.
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Parameters
    ///
    /// * `data_dir` - Directory for the per-key files (inside the sandbox,
    ///   usually under `/host`)
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?data_dir, "initializing JSON file store");
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Directory the store writes into.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Maps a key to its file path.
    ///
    /// Characters outside `[A-Za-z0-9_-]` are replaced with `_` so a key can
    /// never escape the data directory.
    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(BookfinderError::Storage("empty storage key".to_string()));
        }
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        Ok(self.data_dir.join(format!("{file_name}.json")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        let _span = tracing::debug_span!("json_store_get", key = %key).entered();

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(bytes = contents.len(), "value read");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no stored value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _span = tracing::debug_span!("json_store_set", key = %key, bytes = value.len()).entered();

        let tmp_path = path.with_extension("json.tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("value saved");
        Ok(())
    }
}
