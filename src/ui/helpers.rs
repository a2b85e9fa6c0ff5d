//! Shared rendering utilities.
//!
//! All helpers append to a frame `String` instead of writing to stdout, and
//! operate on character indices rather than byte indices.

use crate::ui::theme::Theme;

const ELLIPSIS: &str = "...";

/// Appends a cursor positioning sequence for `row`/`col` (both 1-indexed).
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    out.push_str(&format!("\u{1b}[{row};{col}H"));
}

/// Width of the gallery's tags column for a terminal `cols` wide.
#[must_use]
pub fn gallery_label_width(cols: usize) -> usize {
    (cols * 2 / 5).clamp(16, 48)
}

/// Shortens `text` to at most `max` characters, replacing the tail with
/// `...` when it does not fit.
///
/// # Examples
///
/// ```
/// use imgfinder::ui::helpers::truncate_end;
///
/// assert_eq!(truncate_end("cat, kitten, pet", 10), "cat, ki...");
/// assert_eq!(truncate_end("cat", 10), "cat");
/// ```
#[must_use]
pub fn truncate_end(text: &str, max: usize) -> String {
    let len = text.chars().count();
    if len <= max {
        return text.to_string();
    }
    if max <= ELLIPSIS.len() {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - ELLIPSIS.len()).collect();
    format!("{kept}{ELLIPSIS}")
}

/// Shortens `text` to at most `max` characters, replacing the head with
/// `...`. Used for URLs, whose distinguishing part is at the end.
///
/// # Examples
///
/// ```
/// use imgfinder::ui::helpers::truncate_start;
///
/// assert_eq!(truncate_start("https://cdn.example/12_640.jpg", 13), "...12_640.jpg");
/// ```
#[must_use]
pub fn truncate_start(text: &str, max: usize) -> String {
    let len = text.chars().count();
    if len <= max {
        return text.to_string();
    }
    if max <= ELLIPSIS.len() {
        return text.chars().skip(len - max).collect();
    }
    let kept: String = text.chars().skip(len - (max - ELLIPSIS.len())).collect();
    format!("{ELLIPSIS}{kept}")
}

/// Spaces needed to pad `text` to `width` characters.
#[must_use]
pub fn padding(text: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(text.chars().count()))
}

/// Appends `text` with the given character ranges in match highlight colors.
///
/// Ranges are `(start, end)` character indices with exclusive end. Selected
/// rows are written plain so the selection background stays intact.
pub fn render_highlighted_text(
    out: &mut String,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        out.push_str(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        out.extend(&chars[current_pos..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(&Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
}
