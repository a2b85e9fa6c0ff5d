//! imgfinder: a terminal image search browser for the Pixabay API.
//!
//! Type a query and imgfinder fetches matching images page by page, shows them
//! in a scrollable gallery and opens a preview of the full-size image on
//! demand:
//! - Incremental pagination ("load more") that appends pages in order
//! - Stale responses from superseded queries are discarded
//! - Preview overlay with the full-size URL, openable in the desktop viewer
//! - Fuzzy highlighting of query terms in image tags
//! - Catppuccin themes or a custom TOML theme

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal runtime (main.rs)                         │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Search session state machine                     │
//! │  - Event handling and key bindings                  │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Worker Layer  │   │ Provider      │
//! │ (ui/)         │   │ (worker/)     │   │ (provider/)   │
//! │ - Rendering   │   │ - tokio task  │   │ - Pixabay     │
//! │ - Theming     │   │   per fetch   │   │   HTTP API    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths, external viewer                  │
//! │  - Error types, image model                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to OTLP JSON files         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Read from `<config dir>/imgfinder/config.toml`; every key is optional:
//!
//! ```toml
//! api_key = "12345678-abcdef0123456789"   # or PIXABAY_API_KEY
//! base_url = "https://pixabay.com"
//! page_size = 10
//! timeout_secs = 10
//! safesearch = true
//! theme = "catppuccin-mocha"
//! theme_file = "~/.config/imgfinder/theme.toml"
//! trace_level = "info"
//! ```
//!
//! # Example
//!
//! ```rust
//! use imgfinder::app::{handle_event, Event};
//! use imgfinder::{initialize, Config};
//!
//! let mut state = initialize(&Config::default());
//! for c in "red fox".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_render, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), imgfinder::ImgFinderError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod provider;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchSession};
pub use domain::{ImageResult, ImgFinderError, PageRequest, Result, SearchPage};
pub use ui::Theme;

use domain::{MAX_PER_PAGE, MIN_PER_PAGE};
use provider::pixabay::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::path::Path;

/// Environment variable holding the Pixabay API key; wins over the file.
pub const API_KEY_ENV: &str = "PIXABAY_API_KEY";

/// Application configuration, usually read from `config.toml`.
#[derive(Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Pixabay API key.
    pub api_key: Option<String>,

    /// API host. Default: `https://pixabay.com`
    pub base_url: String,

    /// Results per page, 3 to 200. Default: 10
    pub page_size: u32,

    /// Per-request timeout in seconds. Default: 10
    pub timeout_secs: u64,

    /// Pixabay safe search filter. Default: `true`
    pub safesearch: bool,

    /// Built-in theme name.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file; `~` is expanded.
    pub theme_file: Option<String>,

    /// Tracing filter directive, e.g. `info` or `imgfinder=debug`.
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: 10,
            timeout_secs: 10,
            safesearch: true,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("safesearch", &self.safesearch)
            .field("theme_name", &self.theme_name)
            .field("theme_file", &self.theme_file)
            .field("trace_level", &self.trace_level)
            .finish()
    }
}

impl Config {
    /// Parses configuration from TOML; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ImgFinderError::Config`] on malformed TOML or unknown keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imgfinder::Config;
    ///
    /// let config = Config::from_toml_str("page_size = 20\ntheme = \"catppuccin-latte\"")?;
    /// assert_eq!(config.page_size, 20);
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// assert_eq!(config.timeout_secs, 10);
    /// # Ok::<(), imgfinder::ImgFinderError>(())
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ImgFinderError::Config(e.to_string()))
    }

    /// Loads, merges and validates configuration.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// used and a missing file yields defaults. `PIXABAY_API_KEY` is applied
    /// on top.
    ///
    /// # Errors
    ///
    /// Returns [`ImgFinderError::Config`] if the file cannot be read or parsed
    /// or the result fails [`Config::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match infrastructure::default_config_file() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => {
                    tracing::debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_env_from(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ImgFinderError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "config file loaded");
        Self::from_toml_str(&contents)
    }

    /// Applies environment overrides obtained through `lookup`.
    ///
    /// A non-blank `PIXABAY_API_KEY` replaces the configured key.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
    }

    /// Checks value ranges.
    ///
    /// The API key is not required here; it is checked when the provider is
    /// built, so the UI can still start with a useful error.
    ///
    /// # Errors
    ///
    /// Returns [`ImgFinderError::Config`] if `page_size` is outside 3..=200,
    /// `timeout_secs` is zero or `base_url` is not a URL.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_PER_PAGE..=MAX_PER_PAGE).contains(&self.page_size) {
            return Err(ImgFinderError::Config(format!(
                "page_size must be between {MIN_PER_PAGE} and {MAX_PER_PAGE}, got {}",
                self.page_size
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ImgFinderError::Config("timeout_secs must be positive".to_string()));
        }
        url::Url::parse(&self.base_url).map_err(|e| {
            ImgFinderError::Config(format!("invalid base_url '{}': {e}", self.base_url))
        })?;
        Ok(())
    }
}

/// Creates the initial application state.
///
/// The theme comes from `theme_file`, then `theme`, then the default; a theme
/// that fails to load is logged and replaced by the default.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(page_size = config.page_size, "initializing imgfinder");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(infrastructure::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    AppState::new(config.page_size, theme)
}
