//! Status line and load-more renderers.

use crate::ui::helpers::{padding, position_cursor, truncate_end};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{LoadMoreInfo, StatusLine};

/// Renders the loading, error, empty or summary line at `row`.
///
/// Returns the next available row.
pub fn render_status(
    out: &mut String,
    row: usize,
    status: &StatusLine,
    theme: &Theme,
    cols: usize,
) -> usize {
    let (color, bold, text) = match status {
        StatusLine::Prompt(text) => (&theme.colors.empty_state_fg, false, text.clone()),
        StatusLine::Loading(text) => (&theme.colors.loading_fg, false, text.clone()),
        StatusLine::Error(text) => (&theme.colors.error_fg, true, text.clone()),
        StatusLine::Empty(empty) => (
            &theme.colors.empty_state_fg,
            true,
            format!("{}. {}", empty.message, empty.subtitle),
        ),
        StatusLine::Summary(text) => (&theme.colors.text_dim, false, text.clone()),
    };
    let text = truncate_end(&format!(" {text}"), cols);

    position_cursor(out, row, 1);
    if bold {
        out.push_str(Theme::bold());
    }
    out.push_str(&Theme::fg(color));
    out.push_str(&text);
    out.push_str(&padding(&text, cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the load-more button centered at `row`, or a blank line when no
/// further page is available.
///
/// Returns the next available row.
pub fn render_load_more(
    out: &mut String,
    row: usize,
    load_more: Option<&LoadMoreInfo>,
    theme: &Theme,
    cols: usize,
) -> usize {
    position_cursor(out, row, 1);
    let Some(info) = load_more else {
        out.push_str(&" ".repeat(cols));
        return row + 1;
    };

    let label = truncate_end(&info.label, cols);
    let label_len = label.chars().count();
    let left = cols.saturating_sub(label_len) / 2;

    out.push_str(&" ".repeat(left));
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.search_bar_border));
    out.push_str(&label);
    out.push_str(Theme::reset());
    out.push_str(&" ".repeat(cols.saturating_sub(left + label_len)));
    row + 1
}
