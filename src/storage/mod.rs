//! Storage layer for persisted collections.
//!
//! The plugin keeps two collections across sessions: favourited books and the
//! recent-search list. Both go through a synchronous key-value backend with
//! typed, failure-tolerant loading on top.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait abstraction
//! - `json`: one-file-per-key JSON backend with atomic writes
//! - `memory`: in-process backend
//! - `collection`: typed load/save with default-on-malformed semantics

pub mod backend;
pub mod collection;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use collection::{CollectionStore, FAVOURITES_KEY, RECENT_SEARCHES_KEY};
pub use json::JsonFileStore;
pub use memory::MemoryStore;
