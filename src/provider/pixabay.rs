//! Pixabay image API provider.
//!
//! Issues `GET {base_url}/api/` requests with the query, page and page size and
//! maps the JSON response onto [`SearchPage`].
//!
//! # Response format
//!
//! ```json
//! {
//!   "total": 4692,
//!   "totalHits": 500,
//!   "hits": [
//!     {
//!       "id": 195893,
//!       "tags": "blossom, bloom, flower",
//!       "webformatURL": "https://pixabay.com/get/35bbf209e13e39d2_640.jpg",
//!       "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg"
//!     }
//!   ]
//! }
//! ```
//!
//! `totalHits` (the number of results reachable through the API) drives
//! pagination, not `total`.

use super::ImageSearchProvider;
use crate::domain::error::{ImgFinderError, Result};
use crate::domain::{ImageResult, PageRequest, SearchPage, MAX_PER_PAGE, MIN_PER_PAGE};
use crate::Config;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use url::Url;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP provider for the Pixabay image API.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use imgfinder::provider::PixabayProvider;
///
/// let provider = PixabayProvider::builder()
///     .api_key("12345678-abcdef")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PixabayProvider {
    inner: Arc<ProviderInner>,
}

#[derive(Debug)]
struct ProviderInner {
    http_client: reqwest::Client,
    /// Endpoint URL, `{base_url}/api/`.
    endpoint: Url,
    api_key: SecretString,
    safesearch: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    total_hits: u64,
    hits: Vec<WireHit>,
}

#[derive(Debug, Deserialize)]
struct WireHit {
    id: u64,
    #[serde(default)]
    tags: String,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
}

impl From<WireHit> for ImageResult {
    fn from(hit: WireHit) -> Self {
        Self {
            id: hit.id,
            thumbnail_url: hit.webformat_url,
            full_url: hit.large_image_url,
            tags: hit
                .tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
        }
    }
}

impl PixabayProvider {
    /// Creates a builder for configuring the provider.
    #[must_use]
    pub fn builder() -> PixabayProviderBuilder {
        PixabayProviderBuilder::default()
    }

    /// Builds a provider from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ImgFinderError::Config`] if no API key is configured or the base
    /// URL is invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            ImgFinderError::Config(
                "no Pixabay API key; set `api_key` in the config file or PIXABAY_API_KEY".to_string(),
            )
        })?;

        Self::builder()
            .api_key(api_key)
            .base_url(&config.base_url)
            .timeout(Duration::from_secs(config.timeout_secs))
            .safesearch(config.safesearch)
            .build()
    }

    async fn fetch_page(&self, request: &PageRequest, per_page: u32) -> Result<SearchPage> {
        let params = [
            ("key", self.inner.api_key.expose_secret().to_string()),
            ("q", request.query.clone()),
            ("page", request.page.to_string()),
            ("per_page", per_page.to_string()),
            ("image_type", "photo".to_string()),
            ("orientation", "horizontal".to_string()),
            ("safesearch", self.inner.safesearch.to_string()),
        ];

        let response = self
            .inner
            .http_client
            .get(self.inner.endpoint.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "pixabay returned an error status");
            return Err(ImgFinderError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let wire: WireResponse =
            serde_json::from_str(&body).map_err(|e| ImgFinderError::Decode(e.to_string()))?;

        tracing::debug!(total_hits = wire.total_hits, hits = wire.hits.len(), "pixabay response decoded");

        Ok(SearchPage {
            total_hits: wire.total_hits,
            items: wire.hits.into_iter().map(ImageResult::from).collect(),
        })
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.inner.endpoint.as_str()
    }
}

#[async_trait]
impl ImageSearchProvider for PixabayProvider {
    async fn search(&self, request: &PageRequest) -> Result<SearchPage> {
        let per_page = request.per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE);
        let span = tracing::debug_span!(
            "pixabay_search",
            query = %request.query,
            page = request.page,
            per_page
        );

        self.fetch_page(request, per_page).instrument(span).await
    }

    fn provider_name(&self) -> &'static str {
        "pixabay"
    }
}

/// Builder for [`PixabayProvider`].
#[derive(Default)]
pub struct PixabayProviderBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    safesearch: bool,
}

impl PixabayProviderBuilder {
    /// Sets the API key sent as the `key` query parameter.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Overrides the API host (mainly for tests and proxies).
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables or disables Pixabay's safe search filter.
    #[must_use]
    pub fn safesearch(mut self, enabled: bool) -> Self {
        self.safesearch = enabled;
        self
    }

    /// Builds the provider.
    ///
    /// # Errors
    ///
    /// Returns [`ImgFinderError::Config`] if the API key is missing or empty or the
    /// base URL cannot be parsed, and [`ImgFinderError::Http`] if the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<PixabayProvider> {
        let api_key = self
            .api_key
            .filter(|k| !k.expose_secret().trim().is_empty())
            .ok_or_else(|| ImgFinderError::Config("Pixabay API key is required".to_string()))?;

        let base = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base = if base.ends_with('/') { base } else { format!("{base}/") };
        let endpoint = Url::parse(&base)
            .and_then(|u| u.join("api/"))
            .map_err(|e| ImgFinderError::Config(format!("invalid base URL '{base}': {e}")))?;

        let http_client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(concat!("imgfinder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(PixabayProvider {
            inner: Arc::new(ProviderInner {
                http_client,
                endpoint,
                api_key,
                safesearch: self.safesearch,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_api_key() {
        let err = PixabayProvider::builder().build().unwrap_err();
        assert!(matches!(err, ImgFinderError::Config(_)));

        let err = PixabayProvider::builder().api_key("  ").build().unwrap_err();
        assert!(matches!(err, ImgFinderError::Config(_)));
    }

    #[test]
    fn endpoint_is_joined_onto_base_url() {
        let provider = PixabayProvider::builder()
            .api_key("k")
            .base_url("http://127.0.0.1:8080")
            .build()
            .unwrap();
        assert_eq!(provider.endpoint(), "http://127.0.0.1:8080/api/");

        let provider = PixabayProvider::builder()
            .api_key("k")
            .base_url("http://proxy.local/pixabay/")
            .build()
            .unwrap();
        assert_eq!(provider.endpoint(), "http://proxy.local/pixabay/api/");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let err = PixabayProvider::builder()
            .api_key("k")
            .base_url("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, ImgFinderError::Config(_)));
    }

    #[test]
    fn debug_output_does_not_leak_the_key() {
        let provider = PixabayProvider::builder().api_key("super-secret-key").build().unwrap();
        assert!(!format!("{provider:?}").contains("super-secret-key"));
    }

    #[test]
    fn wire_hit_tags_are_split_and_trimmed() {
        let hit = WireHit {
            id: 9,
            tags: "cat, kitten,  pet ,".to_string(),
            webformat_url: "t".to_string(),
            large_image_url: "f".to_string(),
        };
        let image = ImageResult::from(hit);
        assert_eq!(image.tags, vec!["cat", "kitten", "pet"]);
        assert_eq!(image.thumbnail_url, "t");
        assert_eq!(image.full_url, "f");
    }

    #[test]
    fn from_config_without_key_fails() {
        let config = Config::default();
        assert!(matches!(
            PixabayProvider::from_config(&config),
            Err(ImgFinderError::Config(_))
        ));
    }
}
