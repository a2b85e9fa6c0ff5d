//! Theme management and ANSI escape sequence generation.
//!
//! Supports the built-in Catppuccin variants and custom themes loaded from TOML
//! files, and converts hex colors to 24-bit ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `catppuccin-frappe`: Cool dark theme
//! - `catppuccin-macchiato`: Warm dark theme
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! loading_fg = "#94e2d5"
//! overlay_border = "#cba6f7"
//! ```
//!
//! # Example
//!
//! ```rust
//! use imgfinder::ui::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! let title = format!("{}{}imgfinder{}", Theme::fg(&theme.colors.header_fg), Theme::bold(), Theme::reset());
//! assert!(title.contains("imgfinder"));
//! ```

use crate::domain::error::{ImgFinderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Names of the themes compiled into the binary.
pub const BUILTIN_THEMES: [&str; 4] = [
    "catppuccin-mocha",
    "catppuccin-latte",
    "catppuccin-frappe",
    "catppuccin-macchiato",
];

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. "#cdd6f4").
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, URLs).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Fuzzy match highlight foreground.
    pub match_highlight_fg: String,
    /// Fuzzy match highlight background.
    pub match_highlight_bg: String,

    /// Empty state and prompt message color.
    pub empty_state_fg: String,

    /// Error message color.
    pub error_fg: String,

    /// Loading indicator color.
    pub loading_fg: String,

    /// Preview overlay border color.
    pub overlay_border: String,
}

impl Theme {
    /// Loads a built-in theme by name, or `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-macchiato" => include_str!("../../themes/catppuccin-macchiato.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ImgFinderError::Theme`] if the file cannot be read or its
    /// contents are not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ImgFinderError::Theme(format!("failed to read theme file {}: {e}", path.display()))
        })?;

        toml::from_str(&contents)
            .map_err(|e| ImgFinderError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple; white on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color escape sequence for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// ANSI bold escape sequence.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// ANSI dim escape sequence.
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// ANSI reset escape sequence; clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the theme tests rule
    /// out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn all_builtin_themes_parse() {
        for name in BUILTIN_THEMES {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn unknown_theme_name_is_none() {
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn default_is_mocha() {
        assert_eq!(Theme::default().name, "catppuccin-mocha");
    }

    #[test]
    fn hex_colors_become_ansi_sequences() {
        assert_eq!(Theme::fg("#cdd6f4"), "\u{1b}[38;2;205;214;244m");
        assert_eq!(Theme::bg("1e1e2e"), "\u{1b}[48;2;30;30;46m");
        assert_eq!(Theme::fg("oops"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn custom_theme_file_round_trips() {
        let theme = Theme::default();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut custom = theme.clone();
        custom.name = "custom".to_string();
        write!(file, "{}", toml::to_string(&custom).unwrap()).unwrap();

        let loaded = Theme::from_file(file.path()).unwrap();
        assert_eq!(loaded.name, "custom");
        assert_eq!(loaded.colors, theme.colors);
    }

    #[test]
    fn malformed_theme_file_is_a_theme_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = \"broken\"").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(ImgFinderError::Theme(_))));
        assert!(matches!(
            Theme::from_file("/definitely/not/here.toml"),
            Err(ImgFinderError::Theme(_))
        ));
    }
}
