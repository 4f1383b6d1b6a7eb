//! Error types for the Bookfinder plugin.
//!
//! [`BookfinderError`] covers local failures (storage, configuration, themes)
//! and [`LookupError`] covers catalog lookups. They are kept apart because a
//! lookup failure is a normal, user-visible search outcome while the others
//! are plumbing failures that only ever reach the log.

use thiserror::Error;

/// The main error type for Bookfinder plugin operations.
///
/// # Examples
///
/// ```
/// use bookfinder::domain::BookfinderError;
///
/// fn validate_config() -> Result<(), BookfinderError> {
///     Err(BookfinderError::Config("catalog_url must not be empty".to_string()))
/// }
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum BookfinderError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the key-value backend fails.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for persistence.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Bookfinder operations.
pub type Result<T> = std::result::Result<T, BookfinderError>;

/// Failure of a catalog lookup.
///
/// The `Display` text is shown to the user next to the retry hint, so each
/// message reads as a complete sentence fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The catalog answered with a non-success status.
    #[error("catalog returned HTTP {status}{}", .detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Short error description extracted from the response body.
        detail: Option<String>,
    },

    /// The catalog answered successfully but the body was not understood.
    ///
    /// Holds the parser error for logs; it is not part of the message.
    #[error("unexpected response from catalog")]
    Malformed(String),
}
