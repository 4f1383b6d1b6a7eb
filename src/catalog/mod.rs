//! Catalog lookup protocol.
//!
//! The plugin never performs I/O itself: the search controller produces a
//! [`CatalogRequest`], the plugin shim hands it to the host's web request API,
//! and the host later delivers the status, body and echoed context back as an
//! event. This module owns both ends of that exchange.
//!
//! - `request`: URL construction and the correlation context
//! - `response`: mapping status and body to a lookup outcome

pub mod request;
pub mod response;

pub use request::{
    CatalogConfig, CatalogRequest, RequestContext, TraceContext, DEFAULT_CATALOG_URL, MAX_RESULTS,
};
pub use response::parse_response;
