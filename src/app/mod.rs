//! Application layer coordinating state, events, and actions.
//!
//! Sits between the terminal runtime (main.rs) and the domain, provider and
//! worker layers. Nothing in here performs I/O.
//!
//! ```text
//! Key events → Events → Event Handler → State Mutations → Actions → Side Effects
//!                            ↑                                  ↓
//!                            └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`session`]: Search, pagination and preview state machine
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transitions
//! - [`keymap`]: Key bindings per input mode
//! - [`modes`]: Input mode type
//! - [`state`]: Application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use imgfinder::app::{handle_event, AppState, Event};
//! use imgfinder::ui::Theme;
//!
//! let mut state = AppState::new(10, Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::KeyDown)?;
//! assert!(render && actions.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod actions;
pub mod handler;
pub mod keymap;
pub mod modes;
pub mod session;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keymap::map_key_event;
pub use modes::InputMode;
pub use session::{
    FetchOutcome, FetchPhase, FetchTicket, Generation, Pagination, PreviewState, SearchSession,
    SearchState, Settled,
};
pub use state::AppState;
