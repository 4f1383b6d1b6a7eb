//! Input and view mode state types.
//!
//! [`InputMode`] decides how key presses are read: as text for the search
//! bar, or as commands over the book list. [`ViewMode`] decides which list
//! is shown. Whether the detail overlay is open is not a mode; it follows
//! from the [`Selection`](crate::app::selection::Selection).

/// How key presses are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys edit the search input; Enter submits.
    #[default]
    Typing,

    /// Keys navigate the list and trigger commands.
    Browsing,
}

/// Which collection the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Results of the active search.
    #[default]
    Results,

    /// The favourites collection.
    Favourites,
}
