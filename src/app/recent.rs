//! Recent search queries, most recent first.

use crate::domain::error::Result;
use crate::storage::{CollectionStore, RECENT_SEARCHES_KEY};

/// Maximum number of remembered queries.
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Bounded, deduplicated list of past queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    /// Loads the persisted list, or starts empty.
    ///
    /// Persisted lists longer than the bound are truncated.
    #[must_use]
    pub fn load(store: &CollectionStore) -> Self {
        let mut entries: Vec<String> = store.load(RECENT_SEARCHES_KEY, Vec::new());
        entries.truncate(MAX_RECENT_SEARCHES);
        tracing::debug!(count = entries.len(), "recent searches loaded");
        Self { entries }
    }

    /// Moves `query` to the front, evicting the oldest entry past the bound,
    /// and persists the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list cannot be saved; the in-memory list is
    /// then left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookfinder::app::recent::RecentSearches;
    /// use bookfinder::storage::{CollectionStore, MemoryStore};
    ///
    /// let mut store = CollectionStore::new(Box::new(MemoryStore::default()));
    /// let mut recent = RecentSearches::load(&store);
    /// for query in ["a", "b", "a"] {
    ///     recent.record(query, &mut store)?;
    /// }
    /// assert_eq!(recent.list(), ["a", "b"]);
    /// # Ok::<(), bookfinder::BookfinderError>(())
    /// ```
    pub fn record(&mut self, query: &str, store: &mut CollectionStore) -> Result<()> {
        let next: Vec<String> = std::iter::once(query.to_string())
            .chain(self.entries.iter().filter(|q| *q != query).cloned())
            .take(MAX_RECENT_SEARCHES)
            .collect();

        store.save(RECENT_SEARCHES_KEY, &next)?;
        self.entries = next;

        tracing::debug!(query = %query, count = self.entries.len(), "recent search recorded");
        Ok(())
    }

    /// Remembered queries, most recent first.
    #[must_use]
    pub fn list(&self) -> &[String] {
        &self.entries
    }

    /// Query at zero-based `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }
}
