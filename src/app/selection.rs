//! The book currently open in the detail overlay.

use crate::domain::SharedBook;
use std::rc::Rc;

/// Either empty or holding one shared book record.
///
/// The selection only holds a reference; favourite status is never cached
/// here, so the overlay always reflects the favourites collection.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    current: Option<SharedBook>,
}

impl Selection {
    /// Opens `book`, replacing any existing selection.
    pub fn select(&mut self, book: &SharedBook) {
        tracing::debug!(book_id = %book.id, "book selected");
        self.current = Some(Rc::clone(book));
    }

    /// Closes the selection. Closing an empty selection is a no-op.
    pub fn clear(&mut self) {
        if let Some(book) = self.current.take() {
            tracing::debug!(book_id = %book.id, "selection cleared");
        }
    }

    /// The selected book, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&SharedBook> {
        self.current.as_ref()
    }

    /// Whether the detail overlay is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }
}
