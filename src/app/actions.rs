//! Actions representing side effects to be executed by the terminal runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! runtime executes them in order; nothing in the application layer performs
//! I/O itself.
//!
//! # Example
//!
//! ```rust
//! use imgfinder::app::{Action, AppState};
//! use imgfinder::ui::Theme;
//!
//! let mut state = AppState::new(10, Theme::default());
//! let ticket = state.session.submit_query("cats").unwrap();
//! let actions = vec![Action::post_fetch(ticket)];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::app::session::FetchTicket;
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a message to the fetch worker.
    PostToWorker(WorkerMessage),

    /// Opens a URL with the system's default handler.
    ///
    /// Used to show the full-resolution image outside the terminal.
    OpenInBrowser {
        /// URL to open.
        url: String,
    },

    /// Leaves the application.
    Quit,
}

impl Action {
    /// Wraps `ticket` in a worker fetch message.
    #[must_use]
    pub const fn post_fetch(ticket: FetchTicket) -> Self {
        Self::PostToWorker(WorkerMessage::fetch_page(ticket))
    }
}
