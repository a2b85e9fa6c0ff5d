//! Worker message types for communication between the UI loop and the fetch
//! worker.
//!
//! Requests carry a [`FetchTicket`]; responses echo the ticket's generation so
//! the session can discard outcomes of superseded fetches.

use crate::app::session::{FetchOutcome, FetchTicket, Generation};
use crate::domain::SearchPage;

/// Messages sent from the UI loop to the fetch worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Fetch one page of results for the ticket's query.
    FetchPage {
        /// The fetch to execute.
        ticket: FetchTicket,
    },
}

impl WorkerMessage {
    /// Creates a `FetchPage` message for `ticket`.
    #[must_use]
    pub const fn fetch_page(ticket: FetchTicket) -> Self {
        Self::FetchPage { ticket }
    }
}

/// Responses sent from the fetch worker back to the UI loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// The provider returned a page.
    PageLoaded {
        /// Generation of the ticket that produced this page.
        generation: Generation,
        /// The page itself.
        page: SearchPage,
    },

    /// The provider call failed.
    FetchFailed {
        /// Generation of the ticket that failed.
        generation: Generation,
        /// Human-readable failure description.
        message: String,
    },
}

impl WorkerResponse {
    /// Generation of the ticket this response answers.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        match self {
            Self::PageLoaded { generation, .. } | Self::FetchFailed { generation, .. } => {
                *generation
            }
        }
    }

    /// Converts the response into the outcome applied by the session.
    #[must_use]
    pub fn into_outcome(self) -> (Generation, FetchOutcome) {
        match self {
            Self::PageLoaded { generation, page } => (generation, FetchOutcome::Loaded(page)),
            Self::FetchFailed { generation, message } => {
                (generation, FetchOutcome::Failed(message))
            }
        }
    }
}
