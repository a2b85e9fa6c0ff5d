//! Image search provider contract and implementations.
//!
//! The search session never talks to the network. It issues
//! [`PageRequest`](crate::domain::PageRequest)s which the fetch worker executes
//! against an [`ImageSearchProvider`].
//!
//! - [`pixabay`]: HTTP provider for the Pixabay image API

pub mod pixabay;

pub use pixabay::{PixabayProvider, PixabayProviderBuilder};

use crate::domain::{PageRequest, Result, SearchPage};
use async_trait::async_trait;

/// A source of paginated image search results.
///
/// Implementations must convert every failure (transport, status, payload)
/// into an error rather than panicking; the worker turns errors into a
/// message shown in the gallery.
#[async_trait]
pub trait ImageSearchProvider: Send + Sync {
    /// Fetches one page of results.
    async fn search(&self, request: &PageRequest) -> Result<SearchPage>;

    /// Short provider name used in logs.
    fn provider_name(&self) -> &'static str;
}
