//! Image search domain types.
//!
//! [`ImageResult`] is opaque pass-through data from the provider: the search
//! session never inspects it beyond forwarding it to the gallery and preview.
//! [`PageRequest`] and [`SearchPage`] form the provider contract.

/// Smallest page size the search API accepts.
pub const MIN_PER_PAGE: u32 = 3;

/// Largest page size the search API accepts.
pub const MAX_PER_PAGE: u32 = 200;

/// A single image returned by the search provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResult {
    /// Provider-assigned identifier.
    pub id: u64,
    /// Small preview image suitable for a gallery grid.
    pub thumbnail_url: String,
    /// Full-resolution image shown in the preview.
    pub full_url: String,
    /// Descriptive tags, in provider order.
    pub tags: Vec<String>,
}

impl ImageResult {
    /// Returns the tags joined as a single comma separated label.
    ///
    /// # Examples
    ///
    /// ```
    /// use imgfinder::ImageResult;
    ///
    /// let image = ImageResult {
    ///     id: 1,
    ///     thumbnail_url: "https://cdn.example/t.jpg".into(),
    ///     full_url: "https://cdn.example/f.jpg".into(),
    ///     tags: vec!["cat".into(), "kitten".into()],
    /// };
    /// assert_eq!(image.tags_label(), "cat, kitten");
    /// ```
    #[must_use]
    pub fn tags_label(&self) -> String {
        self.tags.join(", ")
    }
}

/// One page request issued to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Non-empty, trimmed search query.
    pub query: String,
    /// One-based page number.
    pub page: u32,
    /// Number of results per page.
    pub per_page: u32,
}

/// One page of results returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    /// Total number of results reachable for the query across all pages.
    pub total_hits: u64,
    /// Results on this page, in provider order.
    pub items: Vec<ImageResult>,
}
