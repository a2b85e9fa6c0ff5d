//! Input mode state for the application.
//!
//! The application is in one of two input modes:
//! - **Typing**: keystrokes edit the query in the search bar
//! - **Browsing**: keystrokes navigate the gallery and trigger pagination
//!
//! The preview overlay is not a mode: it is part of the search session and
//! takes precedence over both modes while open.

/// Current input handling mode.
///
/// Controls which keybindings are active and the footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// The search bar has focus.
    ///
    /// Accepts characters, backspace, enter (submit) and esc/tab (gallery).
    #[default]
    Typing,

    /// The gallery has focus.
    ///
    /// Accepts j/k for movement, enter to preview, m to load more, / to edit
    /// the query and q to quit.
    Browsing,
}
