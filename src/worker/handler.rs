//! Fetch worker executing provider calls off the UI thread.
//!
//! The worker owns a dedicated thread running a single-threaded tokio runtime.
//! Every posted message is spawned as its own task, so responses arrive in the
//! order their fetches complete rather than the order they were posted; the
//! session's generation check decides which of them still matter.
//!
//! Tasks run inside a span whose parent is the span active when the message
//! was posted, which keeps the UI event and the HTTP call in one trace.

use crate::domain::error::{ImgFinderError, Result};
use crate::provider::ImageSearchProvider;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::Instrument;

/// A message together with the span it was posted from.
struct Envelope {
    message: WorkerMessage,
    parent: tracing::Span,
}

/// Handle to the background fetch thread.
///
/// Dropping the handle closes the request channel and joins the thread. Fetches
/// still in flight at that point are abandoned.
pub struct FetchWorker {
    sender: Option<UnboundedSender<Envelope>>,
    thread: Option<JoinHandle<()>>,
}

impl FetchWorker {
    /// Starts the worker thread.
    ///
    /// Responses are delivered on `responses`; the UI loop drains that channel
    /// between input events.
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime or the thread cannot be created.
    pub fn spawn(
        provider: Arc<dyn ImageSearchProvider>,
        responses: mpsc::Sender<WorkerResponse>,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (sender, mut receiver) = unbounded_channel::<Envelope>();

        tracing::debug!(provider = provider.provider_name(), "starting fetch worker");

        let thread = std::thread::Builder::new()
            .name("imgfinder-fetch".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(envelope) = receiver.recv().await {
                        let span = tracing::debug_span!(
                            parent: &envelope.parent,
                            "worker_handle_message",
                            message_type = ?envelope.message
                        );
                        let provider = Arc::clone(&provider);
                        let responses = responses.clone();

                        tokio::spawn(
                            async move {
                                let response = handle_message(provider.as_ref(), envelope.message).await;
                                if responses.send(response).is_err() {
                                    tracing::debug!("ui loop gone, dropping worker response");
                                }
                            }
                            .instrument(span),
                        );
                    }
                    tracing::debug!("fetch worker channel closed");
                });
            })?;

        Ok(Self {
            sender: Some(sender),
            thread: Some(thread),
        })
    }

    /// Queues a message for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`ImgFinderError::Worker`] if the worker has been shut down or its
    /// thread has exited.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| ImgFinderError::Worker("fetch worker has been shut down".to_string()))?;

        sender
            .send(Envelope {
                message,
                parent: tracing::Span::current(),
            })
            .map_err(|_| ImgFinderError::Worker("fetch worker thread is not running".to_string()))
    }

    /// Closes the request channel and waits for the worker thread to exit.
    pub fn shutdown(&mut self) {
        self.sender.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::warn!("fetch worker thread panicked");
            }
        }
    }
}

impl Drop for FetchWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for FetchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchWorker")
            .field("running", &self.sender.is_some())
            .finish_non_exhaustive()
    }
}

/// Executes one worker message against `provider`.
///
/// Failures are converted into [`WorkerResponse::FetchFailed`] with a
/// human-readable message; this function never fails. Errors outside the
/// provider classes (see [`ImgFinderError::is_provider_error`]) are logged at
/// `warn` and reported as [`ImgFinderError::Provider`].
pub async fn handle_message(
    provider: &dyn ImageSearchProvider,
    message: WorkerMessage,
) -> WorkerResponse {
    match message {
        WorkerMessage::FetchPage { ticket } => {
            let generation = ticket.generation;
            match provider.search(&ticket.request).await {
                Ok(page) => {
                    tracing::debug!(
                        generation,
                        page = ticket.request.page,
                        items = page.items.len(),
                        "fetch succeeded"
                    );
                    WorkerResponse::PageLoaded { generation, page }
                }
                Err(e) if e.is_provider_error() => {
                    tracing::debug!(generation, page = ticket.request.page, error = %e, "fetch failed");
                    WorkerResponse::FetchFailed {
                        generation,
                        message: e.to_string(),
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        generation,
                        provider = provider.provider_name(),
                        error = ?e,
                        "provider returned an unexpected error"
                    );
                    WorkerResponse::FetchFailed {
                        generation,
                        message: ImgFinderError::Provider(e.to_string()).to_string(),
                    }
                }
            }
        }
    }
}
