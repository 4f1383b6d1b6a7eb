//! Infrastructure layer for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`; the
//! helpers here translate user-facing paths into sandbox paths.

pub mod paths;

pub use paths::{default_data_dir, expand_tilde};
