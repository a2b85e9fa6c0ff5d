//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They carry display-ready
//! strings only; all decisions (what the status line says, which rows are in
//! the window, whether load-more is offered) are made while computing them.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    /// Title bar.
    pub header: HeaderInfo,

    /// Query input box.
    pub search_bar: SearchBarInfo,

    /// Loading, error, empty or summary line under the search bar.
    pub status: StatusLine,

    /// Gallery rows inside the visible window.
    pub gallery: Vec<GalleryItem>,

    /// Present when another page can be requested.
    pub load_more: Option<LoadMoreInfo>,

    /// Present while the preview overlay is open.
    pub preview: Option<PreviewInfo>,

    /// Keybinding help.
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text currently typed into the search bar.
    pub query: String,

    /// Whether keystrokes currently go to the search bar.
    pub is_focused: bool,
}

/// One gallery row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    /// One-based position in the full result list.
    pub position: usize,

    /// Tags label, already truncated to the column width.
    pub label: String,

    /// Thumbnail URL, already truncated to the remaining width.
    pub thumbnail: String,

    /// Whether this row is under the cursor.
    pub is_selected: bool,

    /// Character ranges of `label` matching the query, `(start, end)` with
    /// exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Status line shown between the search bar and the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// No query submitted yet.
    Prompt(String),
    /// A fetch is in flight.
    Loading(String),
    /// The last fetch failed.
    Error(String),
    /// The query settled with no results.
    Empty(EmptyState),
    /// Results are shown; counts and page position.
    Summary(String),
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    /// Primary message.
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}

/// Load-more affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMoreInfo {
    /// Button label, including the page position.
    pub label: String,
}

/// Preview overlay contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewInfo {
    /// Overlay title.
    pub title: String,

    /// Tags of the previewed image.
    pub tags: String,

    /// Full-resolution image URL.
    pub full_url: String,

    /// Thumbnail URL.
    pub thumbnail_url: String,

    /// Keybinding hint shown at the bottom of the overlay.
    pub hint: String,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}
