//! Gallery component renderer.
//!
//! Renders image results as a table with a position column, the image tags
//! (with query matches highlighted) and the thumbnail URL.

use crate::ui::helpers::{self, gallery_label_width, padding, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::GalleryItem;

/// Renders the column headers at `row`.
///
/// Returns the next available row.
pub fn render_gallery_headers(out: &mut String, row: usize, theme: &Theme, cols: usize) -> usize {
    let label_width = gallery_label_width(cols);
    let line = format!("{:>4}  {:<label_width$}  {}", "#", "TAGS", "THUMBNAIL");
    let line = helpers::truncate_end(&line, cols);

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&line);
    out.push_str(&padding(&line, cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the gallery rows starting at `row`, then blank lines up to
/// `end_row` (exclusive) so stale rows from the previous frame disappear.
///
/// Returns `end_row`.
pub fn render_gallery_rows(
    out: &mut String,
    row: usize,
    end_row: usize,
    items: &[GalleryItem],
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for item in items {
        if current_row >= end_row {
            break;
        }
        current_row = render_gallery_row(out, current_row, item, theme, cols);
    }

    while current_row < end_row {
        position_cursor(out, current_row, 1);
        out.push_str(&" ".repeat(cols));
        current_row += 1;
    }
    end_row
}

/// Renders a single gallery row.
///
/// Selected rows get the selection colors across the full width; other rows
/// show query matches in the tags column.
fn render_gallery_row(
    out: &mut String,
    row: usize,
    item: &GalleryItem,
    theme: &Theme,
    cols: usize,
) -> usize {
    let label_width = gallery_label_width(cols);

    position_cursor(out, row, 1);
    if item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.selection_fg));
        out.push_str(&Theme::bg(&theme.colors.selection_bg));
    } else {
        out.push_str(&Theme::fg(&theme.colors.text_normal));
    }

    let position = format!("{:>4}  ", item.position);
    out.push_str(&position);
    helpers::render_highlighted_text(out, &item.label, &item.highlight_ranges, theme, item.is_selected);
    out.push_str(&padding(&item.label, label_width));
    out.push_str("  ");

    if !item.is_selected {
        out.push_str(&Theme::fg(&theme.colors.text_dim));
    }
    out.push_str(&item.thumbnail);

    let used = position.len() + label_width + 2 + item.thumbnail.chars().count();
    out.push_str(&" ".repeat(cols.saturating_sub(used)));
    out.push_str(Theme::reset());
    row + 1
}
