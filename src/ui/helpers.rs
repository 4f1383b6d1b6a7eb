//! Shared rendering utilities and helpers.
//!
//! Text measurement here is by `char`, never by byte, so titles with
//! accented or non-Latin characters line up in the table.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed `row` and `col`.
///
/// Every component starts its line with this, so components never depend
/// on where the previous one stopped printing.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, marking the cut with `...`.
///
/// # Examples
///
/// ```
/// use bookfinder::ui::helpers::truncate;
///
/// assert_eq!(truncate("The Left Hand of Darkness", 12), "The Left ...");
/// assert_eq!(truncate("Dune", 12), "Dune");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if char_len(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut shortened: String = text.chars().take(max - 3).collect();
    shortened.push_str("...");
    shortened
}

/// Greedily wraps `text` into lines of at most `width` characters.
///
/// Runs of whitespace collapse to one space. Words longer than `width` are
/// split across lines.
///
/// # Parameters
///
/// * `text` - Text to wrap, typically a book description
/// * `width` - Maximum line width in characters (at least 1)
///
/// # Returns
///
/// The wrapped lines; empty when `text` has no words.
///
/// # Examples
///
/// ```
/// use bookfinder::ui::helpers::wrap_text;
///
/// assert_eq!(wrap_text("a wizard of earthsea", 9), vec!["a wizard", "of", "earthsea"]);
/// assert!(wrap_text("   ", 9).is_empty());
/// ```
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if line.is_empty() { word.len() } else { char_len(&line) + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Prints `text` with the character ranges in `ranges` highlighted.
///
/// On the cursor row the highlight is dropped so the selection colors stay
/// uniform across the row.
///
/// # Parameters
///
/// * `text` - Text to print
/// * `ranges` - Half-open `(start, end)` character ranges, sorted and
///   non-overlapping
/// * `theme` - Active color theme (highlight colors)
/// * `is_selected` - Whether this is the cursor row
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
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

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    print!("{remaining}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Éléments de géométrie", 10), "Élément...");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap_text("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap_text("ab abcdefgh", 4), vec!["ab", "abcd", "efgh"]);
    }

    #[test]
    fn wrap_empty_text() {
        assert!(wrap_text("   ", 10).is_empty());
    }
}
