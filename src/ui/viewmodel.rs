//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed by
//! the renderer. They carry display-ready text and flags only, which keeps
//! every decision about what to show testable without a terminal.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title bar.
    pub header: HeaderInfo,

    /// Search input box.
    pub search_bar: SearchBarInfo,

    /// Numbered recent-search chips, most recent first.
    pub recent: Vec<RecentChip>,

    /// Status line shown above the list, if any.
    pub status: Option<StatusLine>,

    /// Visible window of the book list.
    pub display_items: Vec<DisplayItem>,

    /// Index of the cursor row within `display_items`.
    pub selected_index: usize,

    /// Detail overlay, replacing the list while open.
    pub detail: Option<DetailInfo>,

    /// Key hints.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text, e.g. `" Results (20) "`.
    pub title: String,
}

/// Search input display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text typed so far.
    pub input: String,

    /// Whether keys currently go to the input.
    pub focused: bool,
}

/// One recent-search chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentChip {
    /// Key that re-runs this query (1-based).
    pub number: usize,

    /// The remembered query.
    pub query: String,
}

/// Kind of status message, used to pick its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Nothing searched yet, or an empty favourites list.
    Hint,
    /// A lookup is in flight.
    Loading,
    /// The lookup failed.
    Error,
    /// The lookup succeeded with zero results.
    NoResults,
}

/// Status line above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// Message category.
    pub kind: StatusKind,

    /// Text to display.
    pub message: String,
}

/// One row of the book list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Title, truncated to the title column.
    pub title: String,

    /// Author line, truncated to the remaining width.
    pub authors: String,

    /// Publication year, if known.
    pub year: Option<i32>,

    /// Whether the book is a favourite.
    pub is_favourite: bool,

    /// Whether the cursor is on this row.
    pub is_selected: bool,

    /// Character ranges of `title` matching the active query.
    ///
    /// Each tuple is `(start, end)` in character indices, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Detail overlay display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    /// Book title.
    pub title: String,

    /// Author line.
    pub authors: String,

    /// Live favourite status of the selected book.
    pub is_favourite: bool,

    /// Labelled metadata rows, only those the catalog provided.
    pub fields: Vec<(String, String)>,

    /// Description wrapped to the overlay width.
    pub description: Vec<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Key hints for the current mode.
    pub keybindings: String,
}
