//! Favourite books, persisted on every change.
//!
//! The collection keeps insertion order for display and an id set for
//! membership checks. Toggling is the only mutation: it removes a book whose
//! id is already present and appends it otherwise. The new collection is
//! written to storage before it replaces the in-memory one, so a failed write
//! leaves both unchanged.

use crate::domain::error::Result;
use crate::domain::SharedBook;
use crate::storage::{CollectionStore, FAVOURITES_KEY};
use std::collections::HashSet;
use std::rc::Rc;

/// Ordered set of favourited books, unique by id.
#[derive(Debug, Clone, Default)]
pub struct FavouritesManager {
    books: Vec<SharedBook>,
    ids: HashSet<String>,
}

impl FavouritesManager {
    /// Loads the persisted collection, or starts empty.
    ///
    /// Duplicate ids in the persisted data are collapsed to their first
    /// occurrence.
    #[must_use]
    pub fn load(store: &CollectionStore) -> Self {
        let persisted: Vec<SharedBook> = store.load(FAVOURITES_KEY, Vec::new());

        let mut manager = Self::default();
        for book in persisted {
            if manager.ids.insert(book.id.clone()) {
                manager.books.push(book);
            }
        }

        tracing::debug!(count = manager.books.len(), "favourites loaded");
        manager
    }

    /// Adds `book` if absent, removes it if present, and persists.
    ///
    /// Membership is decided by id, so a different `Rc` holding the same
    /// book removes the stored one.
    ///
    /// # Parameters
    ///
    /// * `book` - Book to toggle
    /// * `store` - Store the updated collection is written to
    ///
    /// # Returns
    ///
    /// Whether the book is a favourite afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be saved; the in-memory
    /// collection is then left unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookfinder::app::favourites::FavouritesManager;
    /// use bookfinder::storage::{CollectionStore, MemoryStore};
    /// use bookfinder::BookRecord;
    /// use std::rc::Rc;
    ///
    /// let mut store = CollectionStore::new(Box::new(MemoryStore::default()));
    /// let mut favourites = FavouritesManager::load(&store);
    /// let book = Rc::new(BookRecord::new("B1", "Dune"));
    ///
    /// assert!(favourites.toggle(&book, &mut store)?);
    /// assert!(!favourites.toggle(&book, &mut store)?);
    /// assert!(!favourites.is_favourite("B1"));
    /// # Ok::<(), bookfinder::BookfinderError>(())
    /// ```
    pub fn toggle(&mut self, book: &SharedBook, store: &mut CollectionStore) -> Result<bool> {
        let _span = tracing::debug_span!("toggle_favourite", book_id = %book.id).entered();

        let now_favourite = !self.ids.contains(&book.id);
        let next: Vec<SharedBook> = if now_favourite {
            self.books.iter().cloned().chain([Rc::clone(book)]).collect()
        } else {
            self.books.iter().filter(|b| b.id != book.id).cloned().collect()
        };

        store.save(FAVOURITES_KEY, &next)?;

        if now_favourite {
            self.ids.insert(book.id.clone());
        } else {
            self.ids.remove(&book.id);
        }
        self.books = next;

        tracing::debug!(now_favourite, count = self.books.len(), "favourites updated");
        Ok(now_favourite)
    }

    /// Whether a book with `id` is in the collection.
    #[must_use]
    pub fn is_favourite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Favourites in the order they were added.
    #[must_use]
    pub fn list(&self) -> &[SharedBook] {
        &self.books
    }

    /// Number of favourites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::BookfinderError;
    use crate::domain::BookRecord;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn book(id: &str) -> SharedBook {
        Rc::new(BookRecord::new(id, format!("Title {id}")))
    }

    fn memory_store() -> CollectionStore {
        CollectionStore::new(Box::new(MemoryStore::default()))
    }

    fn ids(manager: &FavouritesManager) -> Vec<&str> {
        manager.list().iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn double_toggle_restores_membership() {
        let mut store = memory_store();
        let mut favourites = FavouritesManager::load(&store);
        let dune = book("dune");

        assert!(favourites.toggle(&dune, &mut store).unwrap());
        assert!(favourites.is_favourite("dune"));
        assert!(!favourites.toggle(&dune, &mut store).unwrap());
        assert!(!favourites.is_favourite("dune"));
        assert!(favourites.is_empty());
    }

    #[test]
    fn membership_is_by_id_not_content() {
        let mut store = memory_store();
        let mut favourites = FavouritesManager::load(&store);

        favourites.toggle(&book("x"), &mut store).unwrap();
        let edited = Rc::new(BookRecord::new("x", "A different title"));
        assert!(favourites.is_favourite(&edited.id));

        assert!(!favourites.toggle(&edited, &mut store).unwrap());
        assert!(favourites.is_empty());
    }

    #[test]
    fn appends_in_toggle_order_and_stays_unique() {
        let mut store = memory_store();
        let mut favourites = FavouritesManager::load(&store);
        for id in ["a", "b", "a", "c", "a", "b", "b"] {
            favourites.toggle(&book(id), &mut store).unwrap();
        }
        assert_eq!(ids(&favourites), vec!["c", "a", "b"]);
        assert_eq!(favourites.len(), 3);
    }

    #[test]
    fn every_toggle_is_persisted() {
        let mut store = memory_store();
        let mut favourites = FavouritesManager::load(&store);

        favourites.toggle(&book("a"), &mut store).unwrap();
        favourites.toggle(&book("b"), &mut store).unwrap();
        assert_eq!(ids(&FavouritesManager::load(&store)), vec!["a", "b"]);

        favourites.toggle(&book("a"), &mut store).unwrap();
        assert_eq!(ids(&FavouritesManager::load(&store)), vec!["b"]);
    }

    #[test]
    fn malformed_persisted_value_loads_empty() {
        let backend = MemoryStore::with_entries([(FAVOURITES_KEY, "][ definitely not json")]);
        let store = CollectionStore::new(Box::new(backend));
        assert!(FavouritesManager::load(&store).is_empty());
    }

    #[test]
    fn persisted_duplicates_are_collapsed() {
        let json = r#"[{"id":"a","volumeInfo":{"title":"first"}},{"id":"a"},{"id":"b"}]"#;
        let store = CollectionStore::new(Box::new(MemoryStore::with_entries([(FAVOURITES_KEY, json)])));
        let favourites = FavouritesManager::load(&store);
        assert_eq!(ids(&favourites), vec!["a", "b"]);
        assert_eq!(favourites.list()[0].display_title(), "first");
    }

    #[test]
    fn failed_save_leaves_collection_unchanged() {
        struct ReadOnly;
        impl KeyValueStore for ReadOnly {
            fn get(&self, _key: &str) -> Result<Option<String>> {
                Ok(None)
            }
            fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
                Err(BookfinderError::Storage("read-only".to_string()))
            }
        }

        let mut store = CollectionStore::new(Box::new(ReadOnly));
        let mut favourites = FavouritesManager::load(&store);

        assert!(favourites.toggle(&book("a"), &mut store).is_err());
        assert!(!favourites.is_favourite("a"));
        assert!(favourites.is_empty());
    }
}
