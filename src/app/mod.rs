//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the
//! catalog/storage layers. It never calls the host directly.
//!
//! # Architecture
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Host Calls
//!                           ↑                                  ↓
//!                           └─────── Catalog Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input and view mode types
//! - [`search`]: Search session with stale-response protection
//! - [`favourites`]: Persisted favourites collection
//! - [`recent`]: Persisted recent-search list
//! - [`selection`]: Book shown in the detail overlay
//! - [`state`]: Root state container and view model computation

pub mod actions;
pub mod favourites;
pub mod handler;
pub mod modes;
pub mod recent;
pub mod search;
pub mod selection;
pub mod state;

#[cfg(test)]
mod flows;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, ViewMode};
pub use search::{SearchController, SearchStatus};
pub use state::AppState;
