//! Top-level rendering coordinator.
//!
//! Computes the view model from `AppState` and lays the components out into a
//! single frame string. The runtime writes the frame to the terminal in one
//! go, which keeps rendering testable without a terminal.
//!
//! # Example
//!
//! ```rust
//! use imgfinder::app::AppState;
//! use imgfinder::ui::{render, Theme};
//!
//! let state = AppState::new(10, Theme::default());
//! let frame = render(&state, 24, 80);
//! assert!(frame.contains("imgfinder"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the UI for a terminal of `rows` x `cols` into an ANSI frame.
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(rows, cols);
    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

/// Renders a pre-computed view model into an ANSI frame.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut frame = String::with_capacity(rows * cols * 2);
    components::render_layout(&mut frame, vm, theme, rows, cols);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::session::FetchOutcome;
    use crate::domain::{ImageResult, SearchPage};

    fn loaded_state() -> AppState {
        let mut state = AppState::new(10, Theme::default());
        let ticket = state.session.submit_query("fox").unwrap();
        state.session.settle(
            ticket.generation,
            FetchOutcome::Loaded(SearchPage {
                total_hits: 30,
                items: (0..10)
                    .map(|id| ImageResult {
                        id,
                        thumbnail_url: format!("https://cdn.example/{id}_640.jpg"),
                        full_url: format!("https://cdn.example/{id}_1280.jpg"),
                        tags: vec!["fox".into(), "wildlife".into()],
                    })
                    .collect(),
            }),
        );
        state
    }

    #[test]
    fn idle_frame_shows_prompt_and_footer() {
        let state = AppState::new(10, Theme::default());
        let frame = render(&state, 24, 80);
        assert!(frame.contains("Type a query and press Enter"));
        assert!(frame.contains("Enter: search"));
        assert!(frame.contains("\u{1b}[24;1H"));
    }

    #[test]
    fn loaded_frame_lists_images_and_load_more() {
        let state = loaded_state();
        let frame = render(&state, 24, 100);
        assert!(frame.contains("https://cdn.example/9_640.jpg"));
        assert!(frame.contains("Load more (1/3)"));
        assert!(frame.contains("10 images  page 1 of 3"));
    }

    #[test]
    fn preview_overlay_is_drawn_on_top() {
        let mut state = loaded_state();
        let image = state.selected_image().cloned().unwrap();
        state.session.select_image(image);
        let frame = render(&state, 24, 100);

        let overlay_at = frame.find("Image: https://cdn.example/0_1280.jpg").unwrap();
        let footer_at = frame.find("Esc/q/Enter: close preview").unwrap();
        assert!(overlay_at > footer_at);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let state = loaded_state();
        let _ = render(&state, 3, 5);
        let _ = render(&state, 0, 0);
    }
}
