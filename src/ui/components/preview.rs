//! Preview overlay renderer.
//!
//! Draws a bordered box over the middle of the gallery with the selected
//! image's tags and URLs. Drawn last so it covers whatever lies beneath.

use crate::ui::helpers::{padding, position_cursor, truncate_end};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PreviewInfo;

const OVERLAY_MARGIN: usize = 4;
const OVERLAY_HEIGHT: usize = 8;

/// Renders the preview overlay for a terminal of `rows` x `cols`.
pub fn render_preview(
    out: &mut String,
    preview: &PreviewInfo,
    theme: &Theme,
    rows: usize,
    cols: usize,
) {
    let box_width = cols.saturating_sub(OVERLAY_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let top = (rows.saturating_sub(OVERLAY_HEIGHT) / 2).max(1);
    let margin = " ".repeat(OVERLAY_MARGIN);

    let title = truncate_end(&preview.title, inner_width);
    let rule = inner_width.saturating_sub(title.chars().count());
    position_cursor(out, top, 1);
    out.push_str(&margin);
    out.push_str(&Theme::fg(&theme.colors.overlay_border));
    out.push('┌');
    out.push_str(Theme::bold());
    out.push_str(&title);
    out.push_str(Theme::reset());
    out.push_str(&Theme::fg(&theme.colors.overlay_border));
    out.push_str(&"─".repeat(rule));
    out.push('┐');
    out.push_str(Theme::reset());

    let lines = [
        (String::new(), &theme.colors.text_normal),
        (format!(" Tags:  {}", preview.tags), &theme.colors.text_normal),
        (format!(" Image: {}", preview.full_url), &theme.colors.text_normal),
        (format!(" Thumb: {}", preview.thumbnail_url), &theme.colors.text_dim),
        (String::new(), &theme.colors.text_normal),
        (format!(" {}", preview.hint), &theme.colors.text_dim),
    ];

    let mut row = top + 1;
    for (text, color) in &lines {
        let text = truncate_end(text, inner_width);
        position_cursor(out, row, 1);
        out.push_str(&margin);
        out.push_str(&Theme::fg(&theme.colors.overlay_border));
        out.push('│');
        out.push_str(&Theme::fg(color));
        out.push_str(&text);
        out.push_str(&padding(&text, inner_width));
        out.push_str(&Theme::fg(&theme.colors.overlay_border));
        out.push('│');
        out.push_str(Theme::reset());
        row += 1;
    }

    position_cursor(out, row, 1);
    out.push_str(&margin);
    out.push_str(&Theme::fg(&theme.colors.overlay_border));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());
}
