//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input and
//! catalog responses, translating them into state changes and actions. It is
//! the only place where key-level intent is mapped onto [`AppState`]
//! operations.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (`main.rs`)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Submit`
//! - **Focus**: `FocusSearchBar`, `FocusResults`
//! - **Navigation**: `KeyDown`, `KeyUp`, `OpenDetail`, `CloseDetail`
//! - **Commands**: `ToggleFavourite`, `Retry`, `SearchRecent`
//! - **View Switching**: `ShowResults`, `ShowFavourites`
//! - **Host**: `CatalogResponse`, `CloseFocus`
//!
//! # Example
//!
//! ```rust
//! use bookfinder::app::{handle_event, Action, AppState, Event};
//! use bookfinder::catalog::CatalogConfig;
//! use bookfinder::storage::MemoryStore;
//! use bookfinder::ui::Theme;
//!
//! let mut state = AppState::new(
//!     Theme::default(),
//!     CatalogConfig::default(),
//!     Box::new(MemoryStore::default()),
//! );
//! for c in "dune".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions.as_slice(), [Action::FetchCatalog(_)]));
//! # Ok::<(), bookfinder::BookfinderError>(())
//! ```

use super::modes::{InputMode, ViewMode};
use crate::app::{Action, AppState};
use crate::catalog::CatalogRequest;
use crate::domain::error::Result;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Events triggered by user input or host responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character from the search input.
    Backspace,
    /// Submits the search input.
    Submit,
    /// Moves key focus to the search input.
    FocusSearchBar,
    /// Moves key focus to the list.
    FocusResults,
    /// Moves the cursor down by one position (wraps to top).
    KeyDown,
    /// Moves the cursor up by one position (wraps to bottom).
    KeyUp,
    /// Opens the highlighted book in the detail overlay.
    OpenDetail,
    /// Closes the detail overlay.
    CloseDetail,
    /// Toggles favourite status of the detail book, or the highlighted one.
    ToggleFavourite,
    /// Re-runs the active query after a failed lookup.
    Retry,
    /// Re-runs a recent search by its 1-based chip number.
    SearchRecent(usize),
    /// Shows the search results list.
    ShowResults,
    /// Shows the favourites list.
    ShowFavourites,
    /// Hides the plugin pane.
    CloseFocus,

    /// A catalog response delivered by the host.
    CatalogResponse {
        /// Context map echoed back from the request.
        context: BTreeMap<String, String>,
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Vec<u8>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI needs re-rendering, and the actions to execute in
/// order.
///
/// # Errors
///
/// Reserved for failures the plugin cannot continue from. Storage failures
/// while toggling a favourite or recording a search are logged and leave the
/// collections unchanged rather than failing the event.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.input.push(*c);
            tracing::trace!(input = %state.input, "search input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing || state.input.pop().is_none() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![]))
        }
        Event::Submit => {
            let query = state.input.clone();
            let Some(request) = state.submit(&query) else {
                tracing::debug!("blank query, nothing to submit");
                return Ok((false, vec![]));
            };
            state.input.clear();
            state.input_mode = InputMode::Browsing;
            Ok((true, fetch(request)))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::OpenDetail => {
            let Some(book) = state.highlighted_book().map(Rc::clone) else {
                tracing::debug!("no book highlighted");
                return Ok((false, vec![]));
            };
            state.select_book(&book);
            Ok((true, vec![]))
        }
        Event::CloseDetail => {
            let was_open = state.selection.is_open();
            state.close_detail();
            Ok((was_open, vec![]))
        }
        Event::ToggleFavourite => {
            let target = state
                .selection
                .current()
                .or_else(|| state.highlighted_book())
                .map(Rc::clone);
            let Some(book) = target else {
                tracing::debug!("no book to toggle");
                return Ok((false, vec![]));
            };

            match state.toggle_favourite(&book) {
                Ok(now_favourite) => {
                    tracing::debug!(book_id = %book.id, now_favourite, "favourite toggled");
                    Ok((true, vec![]))
                }
                Err(e) => {
                    tracing::error!(book_id = %book.id, error = %e, "failed to persist favourites");
                    Ok((false, vec![]))
                }
            }
        }
        Event::Retry => Ok(state
            .retry()
            .map_or_else(|| (false, vec![]), |request| (true, fetch(request)))),
        Event::SearchRecent(number) => {
            let Some(request) = number.checked_sub(1).and_then(|i| state.submit_recent(i)) else {
                tracing::debug!(number, "no recent search with that number");
                return Ok((false, vec![]));
            };
            state.input_mode = InputMode::Browsing;
            Ok((true, fetch(request)))
        }
        Event::ShowResults => {
            if state.view_mode == ViewMode::Results {
                return Ok((false, vec![]));
            }
            state.show(ViewMode::Results);
            Ok((true, vec![]))
        }
        Event::ShowFavourites => {
            if state.view_mode == ViewMode::Favourites {
                return Ok((false, vec![]));
            }
            state.show(ViewMode::Favourites);
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::CatalogResponse { context, status, body } => {
            let applied = state.apply_catalog_response(context, *status, body);
            Ok((applied, vec![]))
        }
    }
}

fn fetch(request: CatalogRequest) -> Vec<Action> {
    tracing::debug!(seq = request.seq(), url = %request.url, "fetching catalog");
    vec![Action::FetchCatalog(request)]
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::Submit => "Submit",
        Event::FocusSearchBar => "FocusSearchBar",
        Event::FocusResults => "FocusResults",
        Event::KeyDown => "KeyDown",
        Event::KeyUp => "KeyUp",
        Event::OpenDetail => "OpenDetail",
        Event::CloseDetail => "CloseDetail",
        Event::ToggleFavourite => "ToggleFavourite",
        Event::Retry => "Retry",
        Event::SearchRecent(_) => "SearchRecent",
        Event::ShowResults => "ShowResults",
        Event::ShowFavourites => "ShowFavourites",
        Event::CloseFocus => "CloseFocus",
        Event::CatalogResponse { .. } => "CatalogResponse",
    }
}
