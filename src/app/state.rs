//! Application state and view model computation.
//!
//! [`AppState`] pairs the [`SearchSession`] (all search, pagination and preview
//! state) with the purely presentational state the terminal front-end needs:
//! the text being typed, the input mode, the gallery cursor and the theme.
//!
//! # Example
//!
//! ```rust
//! use imgfinder::app::AppState;
//! use imgfinder::ui::Theme;
//!
//! let state = AppState::new(10, Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.gallery.is_empty());
//! ```

use super::modes::InputMode;
use super::session::SearchSession;
use crate::domain::ImageResult;
use crate::ui::helpers::{gallery_label_width, truncate_end, truncate_start};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    EmptyState, FooterInfo, GalleryItem, HeaderInfo, LoadMoreInfo, PreviewInfo, SearchBarInfo,
    StatusLine, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::BTreeSet;

/// Rows taken by everything except gallery rows: header, border, search bar
/// (3), status, column header, load-more line, border, footer.
const CHROME_ROWS: usize = 10;

/// Width of the position column including separator.
const POSITION_COLUMN_WIDTH: usize = 6;

/// Columns of the preview overlay not available to field values: margins,
/// borders and the field label.
const PREVIEW_CHROME_COLS: usize = 20;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Search session owning results, pagination and preview.
    pub session: SearchSession,

    /// Text typed into the search bar; submitted on enter.
    pub input: String,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Zero-based cursor into the session's results.
    pub selected_index: usize,

    /// Color scheme for rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an idle application state requesting `page_size` results per
    /// page.
    #[must_use]
    pub fn new(page_size: u32, theme: Theme) -> Self {
        Self {
            session: SearchSession::new(page_size),
            input: String::new(),
            input_mode: InputMode::Typing,
            selected_index: 0,
            theme,
        }
    }

    /// Moves the cursor down, wrapping to the top. No-op without results.
    pub fn move_selection_down(&mut self) {
        let len = self.session.results().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up, wrapping to the bottom. No-op without results.
    pub fn move_selection_up(&mut self) {
        let len = self.session.results().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Keeps the cursor inside the result list.
    pub fn clamp_selection(&mut self) {
        let len = self.session.results().len();
        self.selected_index = if len == 0 {
            0
        } else {
            self.selected_index.min(len - 1)
        };
    }

    /// Returns the image under the cursor, if any.
    #[must_use]
    pub fn selected_image(&self) -> Option<&ImageResult> {
        self.session.results().get(self.selected_index)
    }

    /// Computes a renderable view model for a terminal of `rows` x `cols`.
    ///
    /// The gallery window is centered on the cursor and shifted to stay full
    /// near either end of the result list.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let results = self.session.results();
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(results.len());
        if visible_end.saturating_sub(visible_start) < available_rows
            && results.len() >= available_rows
        {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let label_width = gallery_label_width(cols);
        let thumbnail_width = cols.saturating_sub(POSITION_COLUMN_WIDTH + label_width + 2);
        let matcher = SkimMatcherV2::default();
        let tokens: Vec<String> = self
            .session
            .query()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();

        let gallery = results
            .get(visible_start..visible_end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(relative_idx, image)| {
                let absolute_idx = visible_start + relative_idx;
                let label = truncate_end(&image.tags_label(), label_width);
                let highlight_ranges = compute_highlight_ranges(&label, &tokens, &matcher);
                GalleryItem {
                    position: absolute_idx + 1,
                    label,
                    thumbnail: truncate_start(&image.thumbnail_url, thumbnail_width),
                    is_selected: absolute_idx == self.selected_index,
                    highlight_ranges,
                }
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.input.clone(),
                is_focused: self.input_mode == InputMode::Typing,
            },
            status: self.compute_status(),
            gallery,
            load_more: self.compute_load_more(),
            preview: self.compute_preview(cols),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let query = self.session.query();
        let title = if query.is_empty() {
            " imgfinder ".to_string()
        } else {
            format!(" imgfinder: \"{query}\" ({}) ", self.session.results().len())
        };
        HeaderInfo { title }
    }

    fn compute_status(&self) -> StatusLine {
        let search = self.session.search();
        let pagination = self.session.pagination();

        if search.is_loading {
            StatusLine::Loading(format!("Loading page {}...", pagination.current_page))
        } else if let Some(error) = &search.error {
            StatusLine::Error(format!("Something went wrong: {error}"))
        } else if self.session.is_empty_result() {
            if self.session.query().is_empty() {
                StatusLine::Prompt("Type a query and press Enter".to_string())
            } else {
                StatusLine::Empty(EmptyState {
                    message: "Nothing to see here".to_string(),
                    subtitle: "Try searching for something else".to_string(),
                })
            }
        } else if self.session.query().is_empty() {
            StatusLine::Prompt("Type a query and press Enter".to_string())
        } else {
            StatusLine::Summary(format!(
                "{} images  page {} of {}",
                self.session.results().len(),
                pagination.current_page,
                pagination.total_pages
            ))
        }
    }

    fn compute_load_more(&self) -> Option<LoadMoreInfo> {
        if !self.session.has_more() || self.session.search().is_loading {
            return None;
        }
        let pagination = self.session.pagination();
        Some(LoadMoreInfo {
            label: format!(
                "[ m: Load more ({}/{}) ]",
                pagination.current_page, pagination.total_pages
            ),
        })
    }

    fn compute_preview(&self, cols: usize) -> Option<PreviewInfo> {
        let preview = self.session.preview();
        if !preview.is_open {
            return None;
        }
        let image = preview.selected.as_ref()?;
        let inner_width = cols.saturating_sub(PREVIEW_CHROME_COLS);

        Some(PreviewInfo {
            title: format!(" Image #{} ", image.id),
            tags: truncate_end(&image.tags_label(), inner_width),
            full_url: truncate_start(&image.full_url, inner_width),
            thumbnail_url: truncate_start(&image.thumbnail_url, inner_width),
            hint: "o: open full size  Esc: close".to_string(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.session.preview().is_open {
            "o: open in viewer  Esc/q/Enter: close preview  Ctrl+c: quit"
        } else {
            match self.input_mode {
                InputMode::Typing => "Enter: search  Esc/Tab: gallery  Ctrl+c: quit",
                InputMode::Browsing => {
                    "j/k: navigate  Enter: preview  m: load more  /: edit query  q: quit"
                }
            }
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Computes character ranges of `label` matched by any of the query `tokens`.
///
/// Matched indices from all tokens are merged and coalesced into contiguous
/// `(start, end)` ranges with exclusive end.
fn compute_highlight_ranges(
    label: &str,
    tokens: &[String],
    matcher: &SkimMatcherV2,
) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    if tokens.is_empty() {
        return vec![];
    }

    // One char out per char in, so match indices line up with `label`.
    let lowered: String = label
        .chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect();
    let indices: BTreeSet<usize> = tokens
        .iter()
        .filter_map(|token| matcher.fuzzy_indices(&lowered, token))
        .flat_map(|(_score, indices)| indices)
        .collect();

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::FetchOutcome;
    use crate::domain::SearchPage;

    fn image(id: u64, tags: &[&str]) -> ImageResult {
        ImageResult {
            id,
            thumbnail_url: format!("https://cdn.example/{id}_640.jpg"),
            full_url: format!("https://cdn.example/{id}_1280.jpg"),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    fn loaded_state(total_hits: u64, count: u64) -> AppState {
        let mut state = AppState::new(10, Theme::default());
        let ticket = state.session.submit_query("cat").unwrap();
        state.session.settle(
            ticket.generation,
            FetchOutcome::Loaded(SearchPage {
                total_hits,
                items: (0..count).map(|i| image(i, &["cat", "animal"])).collect(),
            }),
        );
        state
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut state = loaded_state(3, 3);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_is_noop_without_results() {
        let mut state = AppState::new(10, Theme::default());
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_image().is_none());
    }

    #[test]
    fn idle_state_prompts_for_a_query() {
        let state = AppState::new(10, Theme::default());
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.status, StatusLine::Prompt(_)));
        assert!(vm.load_more.is_none());
        assert!(vm.preview.is_none());
        assert!(vm.search_bar.is_focused);
    }

    #[test]
    fn loading_status_is_reported() {
        let mut state = AppState::new(10, Theme::default());
        state.session.submit_query("cat");
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status, StatusLine::Loading("Loading page 1...".to_string()));
    }

    #[test]
    fn error_status_is_reported() {
        let mut state = AppState::new(10, Theme::default());
        let ticket = state.session.submit_query("cat").unwrap();
        state
            .session
            .settle(ticket.generation, FetchOutcome::Failed("HTTP 500".into()));
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.status, StatusLine::Error("Something went wrong: HTTP 500".to_string()));
    }

    #[test]
    fn empty_result_shows_empty_state() {
        let state = loaded_state(0, 0);
        let vm = state.compute_viewmodel(24, 80);
        assert!(matches!(vm.status, StatusLine::Empty(_)));
    }

    #[test]
    fn load_more_is_offered_only_when_pages_remain() {
        let state = loaded_state(24, 10);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.load_more.unwrap().label, "[ m: Load more (1/3) ]");

        let state = loaded_state(10, 10);
        assert!(state.compute_viewmodel(24, 80).load_more.is_none());
    }

    #[test]
    fn gallery_window_follows_cursor() {
        let mut state = loaded_state(40, 10);
        state.selected_index = 9;
        let vm = state.compute_viewmodel(CHROME_ROWS + 4, 80);

        assert_eq!(vm.gallery.len(), 4);
        assert_eq!(vm.gallery.first().unwrap().position, 7);
        assert_eq!(vm.gallery.last().unwrap().position, 10);
        assert!(vm.gallery[3].is_selected);
    }

    #[test]
    fn query_terms_are_highlighted_in_tags() {
        let state = loaded_state(1, 1);
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.gallery[0].label, "cat, animal");
        assert_eq!(vm.gallery[0].highlight_ranges, vec![(0, 3)]);
    }

    #[test]
    fn preview_is_rendered_when_open() {
        let mut state = loaded_state(1, 1);
        let image = state.selected_image().cloned().unwrap();
        state.session.select_image(image);
        let vm = state.compute_viewmodel(24, 80);
        let preview = vm.preview.unwrap();
        assert_eq!(preview.title, " Image #0 ");
        assert_eq!(preview.full_url, "https://cdn.example/0_1280.jpg");
        assert!(vm.footer.keybindings.starts_with("o: open"));
    }

    #[test]
    fn highlight_ranges_are_coalesced() {
        let matcher = SkimMatcherV2::default();
        let ranges = compute_highlight_ranges("red fox", &["red".into(), "fox".into()], &matcher);
        assert_eq!(ranges, vec![(0, 3), (4, 7)]);
    }

    #[test]
    fn highlight_ranges_index_chars_of_the_original_label() {
        // 'İ' lowercases to two chars with str::to_lowercase.
        let matcher = SkimMatcherV2::default();
        let ranges = compute_highlight_ranges("İstanbul, bridge", &["bridge".into()], &matcher);
        assert_eq!(ranges, vec![(10, 16)]);
    }
}
