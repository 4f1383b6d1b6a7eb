//! Bookfinder: a Zellij plugin for searching a public book catalog.
//!
//! Bookfinder provides:
//! - Free-text search against the Google Books volumes API
//! - A detail view for any result
//! - Favourites and the last five searches, persisted across sessions
//! - Protection against slow responses overwriting newer searches

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Search / favourites / recent / selection         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Catalog       │
//! │ (ui/)         │   │ (storage/)    │   │ (catalog/)    │
//! │ - Rendering   │   │ - JSON files  │   │ - Request URL │
//! │ - Theming     │   │ - Collections │   │ - Context map │
//! │ - Components  │   │ - Backend API │   │ - Parsing     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (book records, errors), Infrastructure      │
//! │  (sandbox paths), Observability (OTLP file traces)  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/bookfinder.wasm" {
//!         api_key "..."
//!         data_dir "~/.local/share/zellij/bookfinder"
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bookfinder::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! for c in "le guin".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_, actions) = handle_event(&mut state, &Event::Submit)?;
//! let Some(Action::FetchCatalog(request)) = actions.first() else { unreachable!() };
//! assert!(request.url.ends_with("?q=le%20guin&maxResults=20"));
//! # Ok::<(), bookfinder::BookfinderError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, ViewMode};
pub use domain::{BookRecord, BookfinderError, Result};
pub use ui::Theme;

use catalog::{CatalogConfig, DEFAULT_CATALOG_URL};
use std::collections::BTreeMap;
use std::path::PathBuf;
use storage::{JsonFileStore, MemoryStore};

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Every key is optional. Empty values count as absent.
///
/// ```kdl
/// plugin location="file:/path/to/bookfinder.wasm" {
///     catalog_url "https://www.googleapis.com/books/v1/volumes"
///     api_key "AIza..."
///     data_dir "~/books"
///     theme "catppuccin-mocha"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Volumes search endpoint.
    pub catalog_url: String,

    /// Optional API key appended as `key=`.
    pub api_key: Option<String>,

    /// Directory for the persisted collections and trace file.
    ///
    /// A leading `~` maps onto the sandbox's `/host` mount.
    pub data_dir: PathBuf,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing, e.g. `debug`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            api_key: None,
            data_dir: infrastructure::default_data_dir(),
            theme_name: None,
            theme_file: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Unknown keys are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::path::Path;
    /// use bookfinder::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("data_dir".to_string(), "~/books".to_string());
    /// map.insert("api_key".to_string(), "".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.data_dir, Path::new("/host/books"));
    /// assert_eq!(config.api_key, None);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };
        let defaults = Self::default();

        Self {
            catalog_url: get("catalog_url").unwrap_or(defaults.catalog_url),
            api_key: get("api_key"),
            data_dir: get("data_dir").map_or(defaults.data_dir, |dir| PathBuf::from(infrastructure::expand_tilde(&dir))),
            theme_name: get("theme"),
            theme_file: get("theme_file").map(|path| infrastructure::expand_tilde(&path)),
            trace_level: get("trace_level").unwrap_or(defaults.trace_level),
        }
    }

    /// Catalog endpoint settings.
    #[must_use]
    pub fn catalog(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.catalog_url.clone(),
            api_key: self.api_key.clone(),
        }
    }

    /// Resolves the theme: `theme_file`, then `theme`, then the default.
    /// Unloadable themes fall back to the default.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            return Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default");
                Theme::default()
            });
        }

        self.theme_name.as_deref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }

    /// Opens the on-disk store under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open_store(&self) -> Result<JsonFileStore> {
        JsonFileStore::new(self.data_dir.clone())
    }
}

/// Creates the application state for `config`.
///
/// The state starts on an in-memory store; the plugin attaches the on-disk
/// store with [`AppState::attach_store`] once filesystem access is granted.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(catalog_url = %config.catalog_url, data_dir = %config.data_dir.display(), "initializing bookfinder");

    AppState::new(config.theme(), config.catalog(), Box::new(MemoryStore::default()))
}
