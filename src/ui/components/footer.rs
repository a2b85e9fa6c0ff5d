//! Footer component renderer.

use crate::ui::helpers::{position_cursor, truncate_end};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the keybinding help centered and dimmed at `row`, truncated to
/// the terminal width.
///
/// Returns the next available row.
pub fn render_footer(
    out: &mut String,
    row: usize,
    footer: &FooterInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let help_text = truncate_end(&footer.keybindings, cols);
    let text_len = help_text.chars().count();
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&" ".repeat(padding));
    out.push_str(&help_text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + text_len)));
    out.push_str(Theme::reset());
    row + 1
}
