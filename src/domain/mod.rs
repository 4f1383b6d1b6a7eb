//! Domain layer for the Bookfinder plugin.
//!
//! Holds the catalog record types and the crate error type. Nothing in here
//! knows about Zellij, storage files, or rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: Catalog book records and display accessors

pub mod book;
pub mod error;

pub use book::{BookRecord, ImageLinks, IndustryIdentifier, SharedBook, VolumeInfo};
pub use error::{BookfinderError, LookupError, Result};
