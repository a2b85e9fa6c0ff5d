//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which key presses,
//! terminal resizes and worker responses mutate [`AppState`]. It never
//! performs I/O: fetches and browser launches are returned as [`Action`]s for
//! the runtime to execute.
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Submit`
//! - **Focus**: `FocusSearch`, `FocusGallery`
//! - **Gallery**: `KeyUp`, `KeyDown`, `LoadMore`, `OpenSelected`
//! - **Preview**: `ClosePreview`, `OpenExternal`
//! - **System**: `Resize`, `Quit`, `Worker`
//!
//! # Example
//!
//! ```rust
//! use imgfinder::app::{handle_event, Action, AppState, Event};
//! use imgfinder::ui::Theme;
//!
//! let mut state = AppState::new(10, Theme::default());
//! for c in "cats".chars() {
//!     handle_event(&mut state, &Event::Char(c))?;
//! }
//! let (_render, actions) = handle_event(&mut state, &Event::Submit)?;
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::app::modes::InputMode;
use crate::app::session::Settled;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::worker::WorkerResponse;

/// Events triggered by user input, terminal changes or worker responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Appends a character to the search input.
    Char(char),
    /// Removes the last character from the search input.
    Backspace,
    /// Submits the search input as a new query.
    Submit,
    /// Gives the search bar keyboard focus.
    FocusSearch,
    /// Gives the gallery keyboard focus.
    FocusGallery,
    /// Moves the gallery cursor up by one (wraps to bottom).
    KeyUp,
    /// Moves the gallery cursor down by one (wraps to top).
    KeyDown,
    /// Requests the next page of results.
    LoadMore,
    /// Opens the preview overlay on the image under the cursor.
    OpenSelected,
    /// Closes the preview overlay.
    ClosePreview,
    /// Opens the previewed image's full-size URL outside the terminal.
    OpenExternal,
    /// Leaves the application.
    Quit,
    /// The terminal was resized.
    Resize,
    /// Wraps a response from the fetch worker.
    Worker(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean in the returned tuple tells the runtime whether the frame must
/// be redrawn. Worker responses that turn out to be stale leave the state
/// untouched and do not request a redraw.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for state transitions that
/// can fail without changing the runtime loop.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Char(c) => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.input.push(*c);
            tracing::trace!(input = %state.input, char = %c, "search input updated");
            Ok((true, vec![]))
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Typing {
                return Ok((false, vec![]));
            }
            state.input.pop();
            Ok((true, vec![]))
        }
        Event::Submit => {
            state.selected_index = 0;
            let ticket = state.session.submit_query(&state.input);
            let Some(ticket) = ticket else {
                tracing::debug!("empty query submitted, gallery cleared");
                return Ok((true, vec![]));
            };
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![Action::post_fetch(ticket)]))
        }
        Event::FocusSearch => {
            state.input_mode = InputMode::Typing;
            Ok((true, vec![]))
        }
        Event::FocusGallery => {
            state.input_mode = InputMode::Browsing;
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::LoadMore => match state.session.request_more() {
            Some(ticket) => Ok((true, vec![Action::post_fetch(ticket)])),
            None => Ok((false, vec![])),
        },
        Event::OpenSelected => {
            let Some(image) = state.selected_image().cloned() else {
                tracing::debug!("no image selected");
                return Ok((false, vec![]));
            };
            state.session.select_image(image);
            Ok((true, vec![]))
        }
        Event::ClosePreview => {
            if !state.session.preview().is_open {
                return Ok((false, vec![]));
            }
            state.session.dismiss_preview();
            Ok((true, vec![]))
        }
        Event::OpenExternal => {
            let preview = state.session.preview();
            match (preview.is_open, preview.selected.as_ref()) {
                (true, Some(image)) => {
                    tracing::debug!(image_id = image.id, url = %image.full_url, "opening full-size image");
                    Ok((
                        false,
                        vec![Action::OpenInBrowser {
                            url: image.full_url.clone(),
                        }],
                    ))
                }
                _ => Ok((false, vec![])),
            }
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::Resize => Ok((true, vec![])),
        Event::Worker(response) => handle_worker_response(state, response),
    }
}

fn handle_worker_response(
    state: &mut AppState,
    response: &WorkerResponse,
) -> Result<(bool, Vec<Action>)> {
    let (generation, outcome) = response.clone().into_outcome();

    match state.session.settle(generation, outcome) {
        Settled::Applied => {
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Settled::Stale => Ok((false, vec![])),
    }
}
