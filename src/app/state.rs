//! Application state management and view model computation.
//!
//! [`AppState`] is the root controller: it owns the search session, the
//! favourites, the recent-search list, the detail selection and the store
//! they persist through, plus the UI-only state (input buffer, modes, cursor,
//! theme). Nothing lives in globals, so every test builds its own instance
//! over an in-memory store.
//!
//! # State Components
//!
//! - **Search**: active query, loading/error/result state, staleness guard
//! - **Favourites**: persisted, id-unique collection with toggle semantics
//! - **Recent**: persisted, bounded list of submitted queries
//! - **Selection**: the book shown in the detail overlay
//! - **Input/View Modes**: how keys are read and which list is shown
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::AppState;
//! use bookfinder::catalog::CatalogConfig;
//! use bookfinder::storage::MemoryStore;
//! use bookfinder::ui::Theme;
//!
//! let mut state = AppState::new(
//!     Theme::default(),
//!     CatalogConfig::default(),
//!     Box::new(MemoryStore::default()),
//! );
//! let request = state.submit("ursula le guin").unwrap();
//! assert_eq!(state.recent.list(), ["ursula le guin"]);
//! assert_eq!(request.seq(), 1);
//! ```

use super::favourites::FavouritesManager;
use super::modes::{InputMode, ViewMode};
use super::recent::RecentSearches;
use super::search::{SearchController, SearchStatus};
use super::selection::Selection;
use crate::catalog::{parse_response, CatalogConfig, CatalogRequest, RequestContext};
use crate::domain::error::Result;
use crate::domain::SharedBook;
use crate::storage::{CollectionStore, KeyValueStore};
use crate::ui::helpers::{truncate, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailInfo, DisplayItem, FooterInfo, HeaderInfo, RecentChip, SearchBarInfo, StatusKind,
    StatusLine, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::{BTreeMap, BTreeSet};

/// Width of the title column in the book list.
pub const TITLE_COLUMN_WIDTH: usize = 44;

/// Rows taken by everything except list rows: blank line, header, two
/// borders, search box (3), recent chips, status line, column headers, footer.
const CHROME_ROWS: usize = 11;

/// Root application state.
pub struct AppState {
    /// Search session.
    pub search: SearchController,

    /// Favourite books.
    pub favourites: FavouritesManager,

    /// Recent search queries.
    pub recent: RecentSearches,

    /// Book open in the detail overlay.
    pub selection: Selection,

    /// Text typed into the search box.
    pub input: String,

    /// How key presses are interpreted.
    pub input_mode: InputMode,

    /// Which list is shown.
    pub view_mode: ViewMode,

    /// Zero-based cursor position within [`AppState::visible_books`].
    pub cursor: usize,

    /// Color scheme for rendering.
    pub theme: Theme,

    /// Backing store for favourites and recent searches.
    collections: CollectionStore,
}

impl AppState {
    /// Creates the root state, loading persisted collections from `backend`.
    #[must_use]
    pub fn new(theme: Theme, catalog: CatalogConfig, backend: Box<dyn KeyValueStore>) -> Self {
        let collections = CollectionStore::new(backend);
        Self {
            search: SearchController::new(catalog),
            favourites: FavouritesManager::load(&collections),
            recent: RecentSearches::load(&collections),
            selection: Selection::default(),
            input: String::new(),
            input_mode: InputMode::Typing,
            view_mode: ViewMode::Results,
            cursor: 0,
            theme,
            collections,
        }
    }

    /// Replaces the backing store and reloads both collections from it.
    ///
    /// The plugin starts on an in-memory store and switches to the disk
    /// store once filesystem access has been granted. Anything recorded
    /// before the switch is merged into the loaded collections and saved:
    /// earlier searches go in front of the persisted ones, and favourites
    /// missing from the store are appended.
    pub fn attach_store(&mut self, backend: Box<dyn KeyValueStore>) {
        let pending_recent = self.recent.list().to_vec();
        let pending_favourites = self.favourites.list().to_vec();

        self.collections = CollectionStore::new(backend);
        self.favourites = FavouritesManager::load(&self.collections);
        self.recent = RecentSearches::load(&self.collections);

        for query in pending_recent.iter().rev() {
            if let Err(e) = self.recent.record(query, &mut self.collections) {
                tracing::error!(error = %e, "failed to persist recent search");
            }
        }
        for book in pending_favourites {
            if self.favourites.is_favourite(&book.id) {
                continue;
            }
            if let Err(e) = self.favourites.toggle(&book, &mut self.collections) {
                tracing::error!(error = %e, book_id = %book.id, "failed to persist favourite");
            }
        }

        self.clamp_cursor();
        tracing::debug!(
            favourites = self.favourites.len(),
            recent = self.recent.list().len(),
            "store attached"
        );
    }

    /// Submits a search.
    ///
    /// Blank queries are ignored. Otherwise the query is recorded as a recent
    /// search before the lookup starts, so it is remembered whatever the
    /// lookup's outcome. Returns the request to issue.
    pub fn submit(&mut self, query: &str) -> Option<CatalogRequest> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        if let Err(e) = self.recent.record(query, &mut self.collections) {
            tracing::error!(error = %e, "failed to persist recent search");
        }

        let request = self.search.submit(query)?;
        self.view_mode = ViewMode::Results;
        self.cursor = 0;
        Some(request)
    }

    /// Re-submits the active query when the last lookup failed.
    pub fn retry(&mut self) -> Option<CatalogRequest> {
        let query = self.search.retry_query()?.to_string();
        self.submit(&query)
    }

    /// Re-submits the recent search at zero-based `index`.
    pub fn submit_recent(&mut self, index: usize) -> Option<CatalogRequest> {
        let query = self.recent.get(index)?.to_string();
        self.submit(&query)
    }

    /// Applies a catalog response delivered by the host.
    ///
    /// Returns whether the search session changed. Responses that cannot be
    /// matched to a submission, and responses to superseded submissions, are
    /// dropped.
    pub fn apply_catalog_response(
        &mut self,
        context: &BTreeMap<String, String>,
        status: u16,
        body: &[u8],
    ) -> bool {
        let Some(context) = RequestContext::from_map(context) else {
            tracing::debug!(status, "catalog response without sequence number, dropping");
            return false;
        };

        let _trace_guard = context.trace.as_ref().and_then(|t| t.attach());
        let _span = tracing::debug_span!(
            "catalog_response",
            seq = context.seq,
            query = %context.query,
            status
        )
        .entered();

        let applied = self.search.apply(context.seq, parse_response(status, body));
        if applied && self.view_mode == ViewMode::Results {
            self.cursor = 0;
        }
        applied
    }

    /// Toggles `book` in the favourites and persists the change.
    ///
    /// # Errors
    ///
    /// Returns an error if the favourites could not be saved; nothing changes
    /// in that case.
    pub fn toggle_favourite(&mut self, book: &SharedBook) -> Result<bool> {
        let now_favourite = self.favourites.toggle(book, &mut self.collections)?;
        self.clamp_cursor();
        Ok(now_favourite)
    }

    /// Opens `book` in the detail overlay.
    pub fn select_book(&mut self, book: &SharedBook) {
        self.selection.select(book);
    }

    /// Closes the detail overlay.
    pub fn close_detail(&mut self) {
        self.selection.clear();
    }

    /// Books in the current list: search results or favourites.
    #[must_use]
    pub fn visible_books(&self) -> &[SharedBook] {
        match self.view_mode {
            ViewMode::Results => self.search.results(),
            ViewMode::Favourites => self.favourites.list(),
        }
    }

    /// Book under the cursor.
    #[must_use]
    pub fn highlighted_book(&self) -> Option<&SharedBook> {
        self.visible_books().get(self.cursor)
    }

    /// Switches the list, resetting the cursor.
    pub fn show(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
        self.cursor = 0;
    }

    /// Moves the cursor down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor + 1) % len;
    }

    /// Moves the cursor up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_books().len();
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_books().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    ///
    /// The list is windowed around the cursor so the cursor row stays
    /// visible. While a book is selected the detail overlay replaces the
    /// list.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let books = self.visible_books();
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let visible_start = if books.len() <= available_rows {
            0
        } else {
            self.cursor
                .saturating_sub(available_rows / 2)
                .min(books.len() - available_rows)
        };
        let visible_end = (visible_start + available_rows).min(books.len());

        let tokens = self.highlight_tokens();
        let matcher = SkimMatcherV2::default();

        let display_items = books
            .get(visible_start..visible_end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(offset, book)| {
                self.compute_display_item(book, visible_start + offset == self.cursor, cols, &tokens, &matcher)
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                input: self.input.clone(),
                focused: self.input_mode == InputMode::Typing,
            },
            recent: self
                .recent
                .list()
                .iter()
                .enumerate()
                .map(|(i, query)| RecentChip {
                    number: i + 1,
                    query: query.clone(),
                })
                .collect(),
            status: self.compute_status(),
            display_items,
            selected_index: self.cursor.saturating_sub(visible_start),
            detail: self.compute_detail(cols),
            footer: self.compute_footer(),
        }
    }

    /// Query tokens to highlight in result titles.
    fn highlight_tokens(&self) -> Vec<String> {
        if self.view_mode != ViewMode::Results {
            return Vec::new();
        }
        self.search
            .query()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect()
    }

    fn compute_display_item(
        &self,
        book: &SharedBook,
        is_selected: bool,
        cols: usize,
        tokens: &[String],
        matcher: &SkimMatcherV2,
    ) -> DisplayItem {
        const MARKER_AND_YEAR_WIDTH: usize = 2 + 6;

        let title = truncate(book.display_title(), TITLE_COLUMN_WIDTH - 1);
        let authors_width = cols.saturating_sub(TITLE_COLUMN_WIDTH + MARKER_AND_YEAR_WIDTH);
        let authors = truncate(&book.display_authors(), authors_width);

        let visible_chars = if title.chars().count() < book.display_title().chars().count() {
            title.chars().count().saturating_sub(3)
        } else {
            title.chars().count()
        };
        let highlight_ranges = compute_highlight_ranges(book.display_title(), tokens, matcher)
            .into_iter()
            .filter(|&(start, _)| start < visible_chars)
            .map(|(start, end)| (start, end.min(visible_chars)))
            .collect();

        DisplayItem {
            title,
            authors,
            year: book.published_year(),
            is_favourite: self.favourites.is_favourite(&book.id),
            is_selected,
            highlight_ranges,
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        if self.selection.is_open() {
            return HeaderInfo {
                title: " Book Details ".to_string(),
            };
        }

        let title = match self.view_mode {
            ViewMode::Favourites => format!(" Favourites ({}) ", self.favourites.len()),
            ViewMode::Results => match self.search.status() {
                SearchStatus::Loaded { books } => {
                    format!(" Results for \"{}\" ({}) ", self.search.query(), books.len())
                }
                _ => " Bookfinder ".to_string(),
            },
        };
        HeaderInfo { title }
    }

    fn compute_status(&self) -> Option<StatusLine> {
        let (kind, message) = match self.view_mode {
            ViewMode::Favourites if self.favourites.is_empty() => (
                StatusKind::Hint,
                "No favourites yet. Press f on a book to add it.".to_string(),
            ),
            ViewMode::Favourites => return None,
            ViewMode::Results => match self.search.status() {
                SearchStatus::Idle => (
                    StatusKind::Hint,
                    "Type a title, author or subject and press Enter.".to_string(),
                ),
                SearchStatus::Loading => (
                    StatusKind::Loading,
                    format!("Searching for \"{}\"...", self.search.query()),
                ),
                SearchStatus::Failed { message } => (
                    StatusKind::Error,
                    format!("Search failed: {message}. Press r to retry."),
                ),
                SearchStatus::Loaded { books } if books.is_empty() => (
                    StatusKind::NoResults,
                    format!("No books found for \"{}\".", self.search.query()),
                ),
                SearchStatus::Loaded { .. } => return None,
            },
        };
        Some(StatusLine { kind, message })
    }

    fn compute_detail(&self, cols: usize) -> Option<DetailInfo> {
        let book = self.selection.current()?;
        let info = &book.volume_info;

        let mut fields = Vec::new();
        if let Some(publisher) = &info.publisher {
            fields.push(("Publisher".to_string(), publisher.clone()));
        }
        if let Some(date) = &info.published_date {
            fields.push(("Published".to_string(), date.clone()));
        }
        if let Some(pages) = info.page_count {
            fields.push(("Pages".to_string(), pages.to_string()));
        }
        if let Some(isbn) = book.isbn() {
            fields.push(("ISBN".to_string(), isbn.to_string()));
        }
        if let Some(cover) = book.thumbnail() {
            fields.push(("Cover".to_string(), cover.to_string()));
        }

        let description = info
            .description
            .as_deref()
            .map(|d| wrap_text(d, cols.saturating_sub(4).max(20)))
            .unwrap_or_default();

        Some(DetailInfo {
            title: book.display_title().to_string(),
            authors: book.display_authors(),
            is_favourite: self.favourites.is_favourite(&book.id),
            fields,
            description,
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.selection.is_open() {
            "f: toggle favourite  Esc/q: close details"
        } else {
            match (self.input_mode, self.view_mode) {
                (InputMode::Typing, _) => "Enter: search  Tab/Esc: browse list  Ctrl+n/p: navigate",
                (InputMode::Browsing, ViewMode::Results)
                    if matches!(self.search.status(), SearchStatus::Failed { .. }) =>
                {
                    "r: retry  /: search  1-5: recent  v: favourites  q: quit"
                }
                (InputMode::Browsing, ViewMode::Results) => {
                    "j/k: navigate  Enter: details  f: favourite  /: search  1-5: recent  v: favourites  q: quit"
                }
                (InputMode::Browsing, ViewMode::Favourites) => {
                    "j/k: navigate  Enter: details  f: remove  /: search  v: results  q: quit"
                }
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("search", &self.search)
            .field("favourites", &self.favourites.len())
            .field("recent", &self.recent)
            .field("selection", &self.selection)
            .field("input_mode", &self.input_mode)
            .field("view_mode", &self.view_mode)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

/// Character ranges of `text` matched by any of `tokens`.
///
/// Each token is fuzzy-matched on its own; the matched character positions
/// are merged and coalesced into `(start, end)` runs, end exclusive.
fn compute_highlight_ranges(text: &str, tokens: &[String], matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let positions: BTreeSet<usize> = tokens
        .iter()
        .filter_map(|token| matcher.fuzzy_indices(text, token))
        .flat_map(|(_score, indices)| indices)
        .collect();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in positions {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookRecord;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    fn state() -> AppState {
        AppState::new(Theme::default(), CatalogConfig::default(), Box::new(MemoryStore::default()))
    }

    fn respond(state: &mut AppState, request: &CatalogRequest, body: &str) -> bool {
        state.apply_catalog_response(&request.context.to_map(), 200, body.as_bytes())
    }

    const THREE_BOOKS: &str = r#"{"items":[
        {"id":"1","volumeInfo":{"title":"Dune","authors":["Frank Herbert"],"publishedDate":"1965"}},
        {"id":"2","volumeInfo":{"title":"Dune Messiah"}},
        {"id":"3","volumeInfo":{"title":"Children of Dune"}}
    ]}"#;

    #[test]
    fn failed_lookup_keeps_recent_search() {
        let mut state = state();
        let request = state.submit("dune").unwrap();
        state.apply_catalog_response(&request.context.to_map(), 500, b"");

        assert_eq!(state.recent.list(), ["dune"]);
        assert!(matches!(state.search.status(), SearchStatus::Failed { .. }));
    }

    #[test]
    fn blank_submit_records_nothing() {
        let mut state = state();
        assert!(state.submit("   ").is_none());
        assert!(state.recent.list().is_empty());
        assert_eq!(state.search.status(), &SearchStatus::Idle);
    }

    #[test]
    fn retry_resubmits_failed_query() {
        let mut state = state();
        assert!(state.retry().is_none());

        let request = state.submit("dune").unwrap();
        state.apply_catalog_response(&request.context.to_map(), 503, b"");

        let retried = state.retry().unwrap();
        assert_eq!(retried.context.query, "dune");
        assert!(retried.seq() > request.seq());
        assert_eq!(state.search.status(), &SearchStatus::Loading);
    }

    #[test]
    fn response_without_context_is_dropped() {
        let mut state = state();
        state.submit("dune").unwrap();
        assert!(!state.apply_catalog_response(&BTreeMap::new(), 200, THREE_BOOKS.as_bytes()));
        assert_eq!(state.search.status(), &SearchStatus::Loading);
    }

    #[test]
    fn submit_recent_uses_stored_query() {
        let mut state = state();
        state.submit("first");
        state.submit("second");

        let request = state.submit_recent(1).unwrap();
        assert_eq!(request.context.query, "first");
        assert_eq!(state.recent.list(), ["first", "second"]);
        assert!(state.submit_recent(7).is_none());
    }

    #[test]
    fn favourite_flag_is_live_in_list_and_detail() {
        let mut state = state();
        let request = state.submit("dune").unwrap();
        assert!(respond(&mut state, &request, THREE_BOOKS));

        let book = Rc::clone(state.highlighted_book().unwrap());
        state.select_book(&book);

        let vm = state.compute_viewmodel(30, 120);
        assert!(!vm.display_items[0].is_favourite);
        assert!(!vm.detail.as_ref().unwrap().is_favourite);

        state.toggle_favourite(&book).unwrap();

        let vm = state.compute_viewmodel(30, 120);
        assert!(vm.display_items[0].is_favourite);
        assert!(vm.detail.as_ref().unwrap().is_favourite);
        assert!(Rc::ptr_eq(state.selection.current().unwrap(), &book));
    }

    #[test]
    fn favourites_view_lists_favourites() {
        let mut state = state();
        let request = state.submit("dune").unwrap();
        respond(&mut state, &request, THREE_BOOKS);

        let second = Rc::clone(&state.search.results()[1]);
        state.toggle_favourite(&second).unwrap();
        state.show(ViewMode::Favourites);

        let titles: Vec<&str> = state.visible_books().iter().map(|b| b.display_title()).collect();
        assert_eq!(titles, vec!["Dune Messiah"]);

        let vm = state.compute_viewmodel(30, 120);
        assert_eq!(vm.header.title, " Favourites (1) ");
        assert!(vm.status.is_none());
        assert!(vm.display_items[0].highlight_ranges.is_empty());
    }

    #[test]
    fn removing_last_favourite_clamps_cursor() {
        let mut state = state();
        let a = Rc::new(BookRecord::new("a", "A"));
        let b = Rc::new(BookRecord::new("b", "B"));
        state.toggle_favourite(&a).unwrap();
        state.toggle_favourite(&b).unwrap();
        state.show(ViewMode::Favourites);
        state.move_selection_down();
        assert_eq!(state.cursor, 1);

        state.toggle_favourite(&b).unwrap();
        assert_eq!(state.cursor, 0);
        assert_eq!(state.highlighted_book().map(|b| b.id.as_str()), Some("a"));
    }

    #[test]
    fn cursor_wraps() {
        let mut state = state();
        let request = state.submit("dune").unwrap();
        respond(&mut state, &request, THREE_BOOKS);

        state.move_selection_up();
        assert_eq!(state.cursor, 2);
        state.move_selection_down();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn status_line_follows_search_state() {
        let mut state = state();
        assert_eq!(state.compute_viewmodel(30, 100).status.unwrap().kind, StatusKind::Hint);

        let request = state.submit("zzz").unwrap();
        assert_eq!(state.compute_viewmodel(30, 100).status.unwrap().kind, StatusKind::Loading);

        respond(&mut state, &request, r#"{"totalItems":0}"#);
        let status = state.compute_viewmodel(30, 100).status.unwrap();
        assert_eq!(status.kind, StatusKind::NoResults);
        assert_eq!(status.message, "No books found for \"zzz\".");

        let request = state.submit("dune").unwrap();
        state.apply_catalog_response(&request.context.to_map(), 500, b"");
        let status = state.compute_viewmodel(30, 100).status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.contains("Press r to retry"));
    }

    #[test]
    fn list_is_windowed_around_cursor() {
        let mut state = state();
        let request = state.submit("many").unwrap();
        let items: Vec<String> = (0..20)
            .map(|i| format!(r#"{{"id":"{i}","volumeInfo":{{"title":"Book {i}"}}}}"#))
            .collect();
        respond(&mut state, &request, &format!(r#"{{"items":[{}]}}"#, items.join(",")));

        for _ in 0..15 {
            state.move_selection_down();
        }

        let vm = state.compute_viewmodel(CHROME_ROWS + 5, 100);
        assert_eq!(vm.display_items.len(), 5);
        assert!(vm.display_items[vm.selected_index].is_selected);
        assert_eq!(vm.display_items[vm.selected_index].title, "Book 15");
    }

    #[test]
    fn title_highlights_query_tokens() {
        let matcher = SkimMatcherV2::default();
        let ranges = compute_highlight_ranges("Children of Dune", &["dune".to_string()], &matcher);
        assert_eq!(ranges, vec![(12, 16)]);
        assert!(compute_highlight_ranges("Emma", &["xyz".to_string()], &matcher).is_empty());
    }

    #[test]
    fn detail_lists_only_known_fields() {
        let mut state = state();
        let mut record = BookRecord::new("x", "Solaris");
        record.volume_info.publisher = Some("Walker".to_string());
        record.volume_info.page_count = Some(204);
        record.volume_info.description = Some("A planet covered by an ocean.".to_string());
        state.select_book(&Rc::new(record));

        let detail = state.compute_viewmodel(30, 80).detail.unwrap();
        let labels: Vec<&str> = detail.fields.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Publisher", "Pages"]);
        assert_eq!(detail.description, vec!["A planet covered by an ocean."]);

        state.close_detail();
        assert!(state.compute_viewmodel(30, 80).detail.is_none());
    }

    #[test]
    fn attach_store_reloads_collections() {
        let mut state = state();
        let backend = MemoryStore::with_entries([
            ("recentSearches", r#"["persisted"]"#),
            ("book-favourites", r#"[{"id":"f1"}]"#),
        ]);
        state.attach_store(Box::new(backend));

        assert_eq!(state.recent.list(), ["persisted"]);
        assert!(state.favourites.is_favourite("f1"));
    }

    #[test]
    fn attach_store_keeps_earlier_changes() {
        let mut state = state();
        state.submit("older");
        state.submit("newer");
        state.submit("persisted");
        state.toggle_favourite(&Rc::new(BookRecord::new("early", "Early"))).unwrap();
        state.toggle_favourite(&Rc::new(BookRecord::new("f1", "Stored"))).unwrap();

        let backend = MemoryStore::with_entries([
            ("recentSearches", r#"["persisted","stored"]"#),
            ("book-favourites", r#"[{"id":"f1"}]"#),
        ]);
        state.attach_store(Box::new(backend));

        assert_eq!(state.recent.list(), ["persisted", "newer", "older", "stored"]);
        let ids: Vec<&str> = state.favourites.list().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "early"]);
    }

    #[test]
    fn short_list_is_not_scrolled() {
        let mut state = state();
        let request = state.submit("few").unwrap();
        let items: Vec<String> = (0..8)
            .map(|i| format!(r#"{{"id":"{i}","volumeInfo":{{"title":"Book {i}"}}}}"#))
            .collect();
        respond(&mut state, &request, &format!(r#"{{"items":[{}]}}"#, items.join(",")));

        for _ in 0..7 {
            state.move_selection_down();
        }

        let vm = state.compute_viewmodel(CHROME_ROWS + 10, 100);
        let titles: Vec<&str> = vm.display_items.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(titles.len(), 8);
        assert_eq!(titles[0], "Book 0");
        assert_eq!(vm.selected_index, 7);
    }

    #[test]
    fn retry_goes_through_submit() {
        let mut state = state();
        state.submit("other");
        let request = state.submit("dune").unwrap();
        assert!(state.retry().is_none());

        state.apply_catalog_response(&request.context.to_map(), 500, b"");
        state.recent.record("newest", &mut state.collections).unwrap();
        let retried = state.retry().unwrap();

        assert_eq!(retried.context.query, "dune");
        assert_eq!(state.recent.list(), ["dune", "newest", "other"]);
    }
}
