//! Zellij plugin wrapper and entry point.
//!
//! This is the only module that talks to the host. It translates Zellij
//! events into library events, runs them through [`handle_event`], and turns
//! the returned actions into host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess` and `FullHdAccess`
//! 3. **Granted**: Attach the on-disk store (favourites and recent searches load)
//! 4. **Update**: Map keys and web responses to events
//! 5. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key` → input, navigation and command events, depending on focus
//! - `WebRequestResult` → `Event::CatalogResponse`
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Search bar focused:
//! - Characters: Type
//! - `Enter`: Search
//! - `Tab` / `Esc` / `Down`: Focus the list
//!
//! List focused:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `Enter`: Open details
//! - `f`: Toggle favourite
//! - `r`: Retry a failed search
//! - `1`-`5`: Re-run a recent search
//! - `v`: Switch between results and favourites
//! - `/` / `Tab`: Focus the search bar
//! - `q` / `Esc`: Close plugin
//!
//! Details open:
//! - `f`: Toggle favourite
//! - `Esc` / `q` / `Backspace`: Close details

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use bookfinder::{handle_event, Action, AppState, Config, Event, InputMode, ViewMode};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: AppState,

    /// Parsed plugin configuration.
    config: Config,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: bookfinder::initialize(&config),
            config,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, initializes tracing and state, requests
    /// permissions, and subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        self.config = Config::from_zellij(&configuration);
        bookfinder::observability::init_tracing(&self.config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        self.app = bookfinder::initialize(&self.config);

        request_permission(&[PermissionType::WebAccess, PermissionType::FullHdAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles a Zellij event. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", otel.name = %format!("plugin_update::{event_name}"), event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::CatalogResponse { context, status, body }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                return self.handle_permission_result(permissions);
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled successfully");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        bookfinder::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        if self.app.selection.is_open() {
            return match key.bare_key {
                BareKey::Esc | BareKey::Backspace | BareKey::Char('q') => Some(Event::CloseDetail),
                BareKey::Char('f') => Some(Event::ToggleFavourite),
                _ => None,
            };
        }

        Some(match self.app.input_mode {
            InputMode::Typing => match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Tab | BareKey::Esc | BareKey::Down => Event::FocusResults,
                BareKey::Backspace => Event::Backspace,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Browsing => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Enter => Event::OpenDetail,
                BareKey::Char('f') => Event::ToggleFavourite,
                BareKey::Char('r') => Event::Retry,
                BareKey::Char('v') => match self.app.view_mode {
                    ViewMode::Results => Event::ShowFavourites,
                    ViewMode::Favourites => Event::ShowResults,
                },
                BareKey::Char('/') | BareKey::Tab => Event::FocusSearchBar,
                BareKey::Char('q') | BareKey::Esc => Event::CloseFocus,
                BareKey::Char(c @ '1'..='5') => Event::SearchRecent(c.to_digit(10)? as usize),
                _ => return None,
            },
        })
    }

    /// Attaches the on-disk store once filesystem access is granted.
    ///
    /// Returns whether the UI should re-render.
    fn handle_permission_result(&mut self, permissions: PermissionStatus) -> bool {
        match permissions {
            PermissionStatus::Granted => match self.config.open_store() {
                Ok(store) => {
                    tracing::debug!(data_dir = %store.data_dir().display(), "permissions granted - attaching store");
                    self.app.attach_store(Box::new(store));
                    true
                }
                Err(e) => {
                    tracing::error!(error = %e, "failed to open data directory, collections will not persist");
                    false
                }
            },
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - searches and favourites will not work");
                false
            }
        }
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                hide_self();
            }
            Action::FetchCatalog(request) => {
                web_request(
                    &request.url,
                    HttpVerb::Get,
                    BTreeMap::new(),
                    vec![],
                    request.context.to_map(),
                );
            }
        }
    }
}
