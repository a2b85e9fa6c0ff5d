//! Composable UI component renderers.
//!
//! Each component appends one region of the frame and returns the next free
//! row.
//!
//! - [`header`]: Title bar
//! - [`search`]: Search input box
//! - [`status`]: Loading / error / empty / summary line and load-more button
//! - [`gallery`]: Result table with match highlighting
//! - [`preview`]: Full-size image overlay
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [Header]
//! [Border]
//! [Search Bar - 3 lines]
//! [Status]
//! [Gallery Headers]
//! [Gallery Rows, padded to fill the screen]
//! [Load more]
//! [Border]
//! [Footer]
//! ```

mod footer;
mod gallery;
mod header;
mod preview;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use footer::render_footer;
use gallery::{render_gallery_headers, render_gallery_rows};
use header::render_header;
use preview::render_preview;
use search::render_search_bar;
use status::{render_load_more, render_status};

/// Rows below the gallery: load-more, border, footer.
const BOTTOM_ROWS: usize = 3;

/// Renders a horizontal border line at `row` and returns the next row.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the full layout of `vm` into `out`.
pub fn render_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 1;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_search_bar(out, current_row, &vm.search_bar, theme, cols);
    current_row = render_status(out, current_row, &vm.status, theme, cols);
    current_row = render_gallery_headers(out, current_row, theme, cols);

    let bottom_start = rows.saturating_sub(BOTTOM_ROWS - 1).max(current_row);
    current_row = render_gallery_rows(out, current_row, bottom_start, &vm.gallery, theme, cols);

    current_row = render_load_more(out, current_row, vm.load_more.as_ref(), theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    render_footer(out, current_row, &vm.footer, theme, cols);

    if let Some(preview) = &vm.preview {
        render_preview(out, preview, theme, rows, cols);
    }
}
