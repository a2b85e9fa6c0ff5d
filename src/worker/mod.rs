//! Background worker for asynchronous image search requests.
//!
//! The worker keeps network I/O off the UI loop. The UI posts
//! [`WorkerMessage`]s and drains [`WorkerResponse`]s from a channel; all state
//! changes still happen on the UI thread through the search session.
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Worker thread and message execution

pub mod handler;
pub mod messages;

pub use handler::{handle_message, FetchWorker};
pub use messages::{WorkerMessage, WorkerResponse};
