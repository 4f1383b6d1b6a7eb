//! Path helpers for the Zellij sandbox.

use std::path::PathBuf;

/// Directory holding the persisted collections and the trace file.
///
/// Resolves to `~/.local/share/zellij/bookfinder` on the host, seen as
/// `/host/.local/share/zellij/bookfinder` from inside the sandbox.
///
/// # Examples
///
/// ```
/// use bookfinder::infrastructure::default_data_dir;
///
/// assert_eq!(
///     default_data_dir().to_str(),
///     Some("/host/.local/share/zellij/bookfinder")
/// );
/// ```
#[must_use]
pub fn default_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookfinder")
}

/// Maps a leading `~` onto the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use bookfinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/books"), "/host/books");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/data/books"), "/data/books");
/// assert_eq!(expand_tilde("~alice/books"), "~alice/books");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}
