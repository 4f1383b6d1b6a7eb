//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns actions, and the
//! plugin shim in `main.rs` turns each one into a host call.

use crate::catalog::CatalogRequest;

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a catalog lookup.
    ///
    /// The request's context must be attached to the host call so the
    /// response can be matched to its submission.
    FetchCatalog(CatalogRequest),
}
