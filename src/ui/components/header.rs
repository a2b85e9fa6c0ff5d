//! Header component renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title bar centered across the full width at `row`.
///
/// Returns the next available row.
pub fn render_header(
    out: &mut String,
    row: usize,
    header: &HeaderInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let title: String = header.title.chars().take(cols).collect();
    let title_len = title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }

    out.push_str(&" ".repeat(padding));
    out.push_str(&title);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + title_len)));

    out.push_str(Theme::reset());
    row + 1
}
