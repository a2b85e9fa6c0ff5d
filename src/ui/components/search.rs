//! Search bar component renderer.

use crate::ui::helpers::{padding, position_cursor, truncate_start};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the 3-line bordered search box starting at `row`.
///
/// ```text
/// [margin] ┌─────────────┐ [margin]
/// [margin] │ Search: ... │ [margin]
/// [margin] └─────────────┘ [margin]
/// ```
///
/// The border uses the focus color only while the box has focus; a block
/// cursor follows the query then. Long queries are shown by their tail.
///
/// Returns the next available row.
pub fn render_search_bar(
    out: &mut String,
    row: usize,
    search: &SearchBarInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.is_focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(out, row, 1);
    out.push_str(&margin);
    out.push_str(&Theme::fg(border_color));
    out.push_str(&format!("┌{}┐", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    let prefix = " Search: ";
    let cursor = if search.is_focused { "█" } else { "" };
    let query_width = inner_width.saturating_sub(prefix.len() + cursor.chars().count());
    let search_text = format!("{prefix}{}{cursor}", truncate_start(&search.query, query_width));

    position_cursor(out, row + 1, 1);
    out.push_str(&margin);
    out.push_str(&Theme::fg(border_color));
    out.push('│');
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    out.push_str(&search_text);
    out.push_str(&padding(&search_text, inner_width));
    out.push_str(&Theme::fg(border_color));
    out.push('│');
    out.push_str(Theme::reset());

    position_cursor(out, row + 2, 1);
    out.push_str(&margin);
    out.push_str(&Theme::fg(border_color));
    out.push_str(&format!("└{}┘", "─".repeat(inner_width)));
    out.push_str(Theme::reset());

    row + 3
}
