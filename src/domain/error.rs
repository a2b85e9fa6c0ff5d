//! Error types for imgfinder.
//!
//! This module defines the centralized error type [`ImgFinderError`] and a type
//! alias [`Result`] used throughout the crate. All errors are implemented with
//! the `thiserror` crate.
//!
//! Provider failures never escape a search session: the worker converts them
//! into a human-readable message that ends up in the session's error slot.

use thiserror::Error;

/// The main error type for imgfinder operations.
///
/// # Examples
///
/// ```
/// use imgfinder::ImgFinderError;
///
/// let err = ImgFinderError::Status { status: 400, body: "[ERROR 400] Invalid API key".into() };
/// assert!(err.is_provider_error());
/// assert_eq!(
///     err.to_string(),
///     "Image search failed with HTTP 400: [ERROR 400] Invalid API key"
/// );
/// ```
#[derive(Debug, Error)]
pub enum ImgFinderError {
    /// The image search provider could not fulfil a request.
    #[error("Image search failed: {0}")]
    Provider(String),

    /// Transport-level failure talking to the image search API.
    ///
    /// Covers DNS failures, refused connections, timeouts and TLS errors.
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The image search API answered with a non-success status code.
    #[error("Image search failed with HTTP {status}: {body}")]
    Status {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, usually a short plain-text explanation.
        body: String,
    },

    /// The image search API answered with a payload that could not be decoded.
    #[error("Malformed search response: {0}")]
    Decode(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or terminal I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The background fetch worker is unavailable.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

impl ImgFinderError {
    /// Returns `true` for failures that originate from the search request
    /// itself (network, HTTP status, malformed payload).
    #[must_use]
    pub const fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Provider(_) | Self::Http(_) | Self::Status { .. } | Self::Decode(_)
        )
    }
}

/// A specialized `Result` type for imgfinder operations.
pub type Result<T> = std::result::Result<T, ImgFinderError>;
