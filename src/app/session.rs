//! Search session controller.
//!
//! [`SearchSession`] owns all mutable search state: the accumulated results,
//! pagination, the active query and the preview overlay. It performs no I/O.
//! Operations that need a page from the provider return a [`FetchTicket`]
//! which the caller hands to the fetch worker; the worker's outcome is fed
//! back through [`SearchSession::settle`].
//!
//! # Fetch generations
//!
//! Every accepted `submit_query` or `request_more` bumps a generation counter
//! and stamps it on the issued ticket. `settle` discards any outcome whose
//! generation is not the current one, so a slow response for an old query can
//! never overwrite or interleave with the results of a newer one.
//!
//! ```text
//!            submit_query / request_more
//!   Idle ───────────────────────────────▶ Loading
//!                                          │    │
//!                           settle(Ok)     │    │  settle(Err)
//!                                          ▼    ▼
//!                                     Loaded    Errored
//! ```
//!
//! # Example
//!
//! ```rust
//! use imgfinder::app::session::{FetchOutcome, SearchSession};
//! use imgfinder::SearchPage;
//!
//! let mut session = SearchSession::new(10);
//! let ticket = session.submit_query("cats").expect("non-empty query fetches");
//! assert_eq!(ticket.request.page, 1);
//!
//! session.settle(ticket.generation, FetchOutcome::Loaded(SearchPage {
//!     total_hits: 24,
//!     items: vec![],
//! }));
//! assert_eq!(session.pagination().total_pages, 3);
//! assert!(session.has_more());
//! ```

use crate::domain::{ImageResult, PageRequest, SearchPage, MAX_PER_PAGE, MIN_PER_PAGE};

/// Monotonically increasing fetch counter used to detect stale outcomes.
pub type Generation = u64;

/// A fetch the session wants executed against the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Generation the outcome must carry to be applied.
    pub generation: Generation,
    /// Query, page and page size to request.
    pub request: PageRequest,
}

/// Result of executing a [`FetchTicket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The provider returned a page.
    Loaded(SearchPage),
    /// The provider failed; the string is shown to the user.
    Failed(String),
}

/// Whether a settled outcome changed the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The outcome matched the current generation and was applied.
    Applied,
    /// The outcome belonged to a superseded fetch and was dropped.
    Stale,
}

/// Phase of the most recent fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// No fetch issued for the current query.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Loaded,
    /// The last fetch failed.
    Errored,
}

/// Accumulated results and the fetch status flags shown by the gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Results in arrival order. Overlap between pages is kept as-is.
    pub results: Vec<ImageResult>,
    /// `true` while the tracked fetch is in flight.
    pub is_loading: bool,
    /// Description of the last failure, cleared when a new fetch starts.
    pub error: Option<String>,
}

/// Page cursor for the active query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// One-based page most recently requested.
    pub current_page: u32,
    /// Pages available according to the latest response; `0` until known.
    pub total_pages: u32,
}

impl Pagination {
    const fn reset() -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
        }
    }

    /// Returns `true` when pages beyond `current_page` remain.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::reset()
    }
}

/// Full-size preview overlay state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewState {
    /// Whether the overlay is visible.
    pub is_open: bool,
    /// Image shown in the overlay.
    pub selected: Option<ImageResult>,
}

/// Owner of all search state and the only place it is mutated.
#[derive(Debug, Clone)]
pub struct SearchSession {
    page_size: u32,
    query: String,
    submitted: bool,
    search: SearchState,
    pagination: Pagination,
    preview: PreviewState,
    generation: Generation,
    phase: FetchPhase,
}

impl SearchSession {
    /// Creates an idle session requesting `page_size` results per page.
    ///
    /// The page size is clamped to [`MIN_PER_PAGE`]..=[`MAX_PER_PAGE`], the
    /// range the provider serves, so `total_pages` counts real pages.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.clamp(MIN_PER_PAGE, MAX_PER_PAGE),
            query: String::new(),
            submitted: false,
            search: SearchState::default(),
            pagination: Pagination::default(),
            preview: PreviewState::default(),
            generation: 0,
            phase: FetchPhase::Idle,
        }
    }

    /// Starts a new search.
    ///
    /// Resets results, error and pagination to page 1 and invalidates any
    /// in-flight fetch. The query is trimmed; an empty query clears the
    /// gallery without fetching and returns `None`.
    pub fn submit_query(&mut self, query: &str) -> Option<FetchTicket> {
        let query = query.trim();
        let _span = tracing::debug_span!("submit_query", query = %query).entered();

        self.query = query.to_string();
        self.submitted = true;
        self.search = SearchState::default();
        self.pagination = Pagination::reset();
        self.generation += 1;

        if self.query.is_empty() {
            tracing::debug!(generation = self.generation, "empty query, results cleared without fetching");
            self.phase = FetchPhase::Idle;
            return None;
        }

        Some(self.begin_fetch())
    }

    /// Requests the next page of the active query.
    ///
    /// Returns `None` and leaves the session untouched when there is no
    /// active query, no further page, or a fetch is still in flight.
    pub fn request_more(&mut self) -> Option<FetchTicket> {
        if self.query.is_empty() {
            tracing::debug!("load more ignored: no active query");
            return None;
        }
        if !self.pagination.has_more() {
            tracing::debug!(
                current_page = self.pagination.current_page,
                total_pages = self.pagination.total_pages,
                "load more ignored: no further pages"
            );
            return None;
        }
        if self.search.is_loading {
            tracing::debug!("load more ignored: fetch already in flight");
            return None;
        }

        self.pagination.current_page += 1;
        self.generation += 1;
        Some(self.begin_fetch())
    }

    /// Opens the preview overlay on `image`.
    pub fn select_image(&mut self, image: ImageResult) {
        tracing::debug!(image_id = image.id, "preview opened");
        self.preview = PreviewState {
            is_open: true,
            selected: Some(image),
        };
    }

    /// Closes the preview overlay.
    pub fn dismiss_preview(&mut self) {
        self.preview = PreviewState::default();
    }

    /// Applies the outcome of the fetch stamped with `generation`.
    ///
    /// Outcomes from superseded fetches are dropped and reported as
    /// [`Settled::Stale`]. A failed load-more rolls the page cursor back so
    /// the same page can be requested again.
    pub fn settle(&mut self, generation: Generation, outcome: FetchOutcome) -> Settled {
        if generation != self.generation || !self.search.is_loading {
            tracing::debug!(
                generation,
                current_generation = self.generation,
                "discarding stale fetch outcome"
            );
            return Settled::Stale;
        }

        self.search.is_loading = false;

        match outcome {
            FetchOutcome::Loaded(page) => {
                let total_pages = page.total_hits.div_ceil(u64::from(self.page_size));
                self.pagination.total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
                tracing::debug!(
                    page = self.pagination.current_page,
                    received = page.items.len(),
                    total_hits = page.total_hits,
                    total_pages = self.pagination.total_pages,
                    "page loaded"
                );
                self.search.results.extend(page.items);
                self.phase = FetchPhase::Loaded;
            }
            FetchOutcome::Failed(message) => {
                tracing::warn!(page = self.pagination.current_page, error = %message, "page fetch failed");
                if self.pagination.current_page > 1 {
                    self.pagination.current_page -= 1;
                }
                self.search.error = Some(message);
                self.phase = FetchPhase::Errored;
            }
        }

        Settled::Applied
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.search.is_loading = true;
        self.search.error = None;
        self.phase = FetchPhase::Loading;

        let ticket = FetchTicket {
            generation: self.generation,
            request: PageRequest {
                query: self.query.clone(),
                page: self.pagination.current_page,
                per_page: self.page_size,
            },
        };
        tracing::debug!(
            generation = ticket.generation,
            page = ticket.request.page,
            "fetch issued"
        );
        ticket
    }

    /// The active query; empty until a non-empty query is submitted.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Results, loading flag and error.
    #[must_use]
    pub const fn search(&self) -> &SearchState {
        &self.search
    }

    /// Accumulated results in arrival order.
    #[must_use]
    pub fn results(&self) -> &[ImageResult] {
        &self.search.results
    }

    /// Page cursor for the active query.
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Preview overlay state.
    #[must_use]
    pub const fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Current fetch generation.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Phase of the most recent fetch cycle.
    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        self.phase
    }

    /// Results requested per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// `true` when a further page can be requested.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.pagination.has_more()
    }

    /// `true` when a query was submitted and settled with nothing to show.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.submitted
            && self.search.error.is_none()
            && !self.search.is_loading
            && self.search.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(id: u64) -> ImageResult {
        ImageResult {
            id,
            thumbnail_url: format!("https://cdn.example/{id}_640.jpg"),
            full_url: format!("https://cdn.example/{id}_1280.jpg"),
            tags: vec!["cat".into(), format!("tag{id}")],
        }
    }

    fn page(total_hits: u64, ids: std::ops::Range<u64>) -> FetchOutcome {
        FetchOutcome::Loaded(SearchPage {
            total_hits,
            items: ids.map(image).collect(),
        })
    }

    #[test]
    fn submit_query_resets_state_and_requests_first_page() {
        let mut session = SearchSession::new(10);
        let first = session.submit_query("cats").unwrap();
        session.settle(first.generation, page(24, 0..10));
        session.request_more().unwrap();

        let ticket = session.submit_query("dogs").unwrap();

        assert!(session.results().is_empty());
        assert_eq!(session.pagination().current_page, 1);
        assert_eq!(session.pagination().total_pages, 0);
        assert_eq!(ticket.request.query, "dogs");
        assert_eq!(ticket.request.page, 1);
        assert_eq!(ticket.request.per_page, 10);
        assert!(session.search().is_loading);
        assert_eq!(session.phase(), FetchPhase::Loading);
    }

    #[test]
    fn submit_query_trims_whitespace() {
        let mut session = SearchSession::new(10);
        let ticket = session.submit_query("  red fox ").unwrap();
        assert_eq!(ticket.request.query, "red fox");
        assert_eq!(session.query(), "red fox");
    }

    #[test]
    fn empty_query_clears_without_fetching() {
        let mut session = SearchSession::new(10);
        let ticket = session.submit_query("cats").unwrap();
        session.settle(ticket.generation, page(24, 0..10));

        assert!(session.submit_query("").is_none());
        assert!(session.submit_query("   ").is_none());

        assert!(session.results().is_empty());
        assert!(!session.search().is_loading);
        assert_eq!(session.query(), "");
        assert_eq!(session.phase(), FetchPhase::Idle);
        assert!(session.request_more().is_none());
    }

    #[test]
    fn pages_accumulate_in_settle_order() {
        let mut session = SearchSession::new(10);

        let t1 = session.submit_query("cats").unwrap();
        assert_eq!(session.settle(t1.generation, page(24, 0..10)), Settled::Applied);
        assert_eq!(session.results().len(), 10);
        assert_eq!(session.pagination().total_pages, 3);
        assert!(session.has_more());

        let t2 = session.request_more().unwrap();
        assert_eq!(t2.request.page, 2);
        session.settle(t2.generation, page(24, 10..20));
        assert_eq!(session.results().len(), 20);
        assert_eq!(session.pagination().current_page, 2);
        assert!(session.has_more());

        let t3 = session.request_more().unwrap();
        session.settle(t3.generation, page(24, 20..22));
        assert_eq!(session.results().len(), 22);
        assert_eq!(session.pagination().current_page, 3);
        assert!(!session.has_more());

        let ids: Vec<u64> = session.results().iter().map(|i| i.id).collect();
        assert_eq!(ids, (0..22).collect::<Vec<_>>());
    }

    #[test]
    fn request_more_on_last_page_is_a_noop() {
        let mut session = SearchSession::new(10);
        let ticket = session.submit_query("cats").unwrap();
        session.settle(ticket.generation, page(7, 0..7));

        let before = session.clone();
        assert!(session.request_more().is_none());
        assert_eq!(session.pagination(), before.pagination());
        assert_eq!(session.generation(), before.generation());
        assert_eq!(session.results(), before.results());
    }

    #[test]
    fn request_more_before_first_page_settles_is_rejected() {
        let mut session = SearchSession::new(10);
        let _ticket = session.submit_query("cats").unwrap();
        assert!(session.request_more().is_none());
        assert_eq!(session.pagination().current_page, 1);
    }

    #[test]
    fn request_more_while_loading_is_rejected() {
        let mut session = SearchSession::new(10);
        let t1 = session.submit_query("cats").unwrap();
        session.settle(t1.generation, page(100, 0..10));
        let t2 = session.request_more().unwrap();

        assert!(session.request_more().is_none());
        assert_eq!(session.pagination().current_page, 2);
        assert_eq!(session.generation(), t2.generation);
    }

    #[test]
    fn failure_keeps_results_and_records_error() {
        let mut session = SearchSession::new(10);
        let t1 = session.submit_query("cats").unwrap();
        session.settle(t1.generation, page(24, 0..10));
        let t2 = session.request_more().unwrap();

        session.settle(t2.generation, FetchOutcome::Failed("HTTP 500".into()));

        assert_eq!(session.results().len(), 10);
        assert!(!session.search().is_loading);
        assert_eq!(session.search().error.as_deref(), Some("HTTP 500"));
        assert_eq!(session.phase(), FetchPhase::Errored);
        assert_eq!(session.pagination().current_page, 1);
        assert!(session.has_more());
    }

    #[test]
    fn retrying_load_more_after_failure_requests_same_page() {
        let mut session = SearchSession::new(10);
        let t1 = session.submit_query("cats").unwrap();
        session.settle(t1.generation, page(24, 0..10));
        let t2 = session.request_more().unwrap();
        session.settle(t2.generation, FetchOutcome::Failed("timeout".into()));

        let retry = session.request_more().unwrap();
        assert_eq!(retry.request.page, 2);
        assert!(session.search().error.is_none());
    }

    #[test]
    fn first_page_failure_is_not_an_empty_result() {
        let mut session = SearchSession::new(10);
        let ticket = session.submit_query("cats").unwrap();
        session.settle(ticket.generation, FetchOutcome::Failed("offline".into()));

        assert_eq!(session.pagination().current_page, 1);
        assert!(!session.is_empty_result());
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut session = SearchSession::new(10);
        let old = session.submit_query("cats").unwrap();
        let new = session.submit_query("dogs").unwrap();

        assert_eq!(session.settle(old.generation, page(24, 0..10)), Settled::Stale);
        assert!(session.results().is_empty());
        assert!(session.search().is_loading);

        assert_eq!(session.settle(new.generation, page(3, 100..103)), Settled::Applied);
        assert_eq!(session.results().len(), 3);
        assert_eq!(session.results()[0].id, 100);
    }

    #[test]
    fn outcome_for_fetch_cancelled_by_empty_query_is_discarded() {
        let mut session = SearchSession::new(10);
        let ticket = session.submit_query("cats").unwrap();
        session.submit_query("");

        assert_eq!(session.settle(ticket.generation, page(24, 0..10)), Settled::Stale);
        assert!(session.results().is_empty());
        assert!(!session.search().is_loading);
    }

    #[test]
    fn duplicate_settle_is_ignored() {
        let mut session = SearchSession::new(10);
        let ticket = session.submit_query("cats").unwrap();
        session.settle(ticket.generation, page(24, 0..10));
        assert_eq!(session.settle(ticket.generation, page(24, 0..10)), Settled::Stale);
        assert_eq!(session.results().len(), 10);
    }

    #[test]
    fn overlapping_pages_keep_duplicates() {
        let mut session = SearchSession::new(3);
        let t1 = session.submit_query("cats").unwrap();
        session.settle(t1.generation, page(6, 0..3));
        let t2 = session.request_more().unwrap();
        session.settle(t2.generation, page(6, 2..5));

        let ids: Vec<u64> = session.results().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 2, 3, 4]);
    }

    #[test]
    fn preview_round_trip_returns_to_closed() {
        let mut session = SearchSession::new(10);
        session.select_image(image(7));
        assert!(session.preview().is_open);
        assert_eq!(session.preview().selected.as_ref().map(|i| i.id), Some(7));

        session.dismiss_preview();
        assert_eq!(session.preview(), &PreviewState::default());
    }

    #[test]
    fn preview_is_independent_of_query_reset() {
        let mut session = SearchSession::new(10);
        session.select_image(image(7));
        session.submit_query("dogs");
        assert!(session.preview().is_open);
    }

    #[test]
    fn empty_result_requires_a_submitted_query() {
        let mut session = SearchSession::new(10);
        assert!(!session.is_empty_result());

        let ticket = session.submit_query("zzzzqqq").unwrap();
        assert!(!session.is_empty_result());

        session.settle(ticket.generation, page(0, 0..0));
        assert!(session.is_empty_result());
        assert_eq!(session.pagination().total_pages, 0);
        assert!(!session.has_more());
    }

    #[test]
    fn page_size_is_clamped_to_api_bounds() {
        assert_eq!(SearchSession::new(0).page_size(), MIN_PER_PAGE);
        assert_eq!(SearchSession::new(500).page_size(), MAX_PER_PAGE);
    }

    #[test]
    fn small_page_size_does_not_overcount_pages() {
        let mut session = SearchSession::new(2);
        let ticket = session.submit_query("cats").unwrap();
        assert_eq!(ticket.request.per_page, 3);

        session.settle(
            ticket.generation,
            FetchOutcome::Loaded(SearchPage {
                total_hits: 6,
                items: (0..3).map(image).collect(),
            }),
        );
        assert_eq!(session.pagination().total_pages, 2);

        let ticket = session.request_more().unwrap();
        session.settle(
            ticket.generation,
            FetchOutcome::Loaded(SearchPage {
                total_hits: 6,
                items: (3..6).map(image).collect(),
            }),
        );
        assert!(!session.has_more());
        assert!(session.request_more().is_none());
    }
}
