//! Detail overlay renderer.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const LABEL_WIDTH: usize = 11;
const INDENT: usize = 2;

/// Renders the selected book from `row` down to `last_row` inclusive.
///
/// Description lines that do not fit are cut off with a trailing `...` line.
/// Every row in the range is cleared first, so a shorter book never leaves
/// text from the previous one behind.
///
/// # Parameters
///
/// * `row` - First body row (1-indexed)
/// * `last_row` - Last body row, inclusive
/// * `detail` - Detail view model of the selected book
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Layout
///
/// ```text
///   Dune
///   Frank Herbert
///   ♥ favourite
///
///   Publisher  Chilton Books
///   Published  1965
///   Pages      412
///
///   Set on the desert planet Arrakis...
/// ```
pub fn render_detail(row: usize, last_row: usize, detail: &DetailInfo, theme: &Theme, cols: usize) {
    let width = cols.saturating_sub(INDENT * 2);
    let mut lines: Vec<String> = Vec::new();

    let marker = if detail.is_favourite {
        format!("{}♥ favourite{}", Theme::fg(&theme.colors.favourite_fg), Theme::reset())
    } else {
        format!("{}♡ not a favourite{}", Theme::fg(&theme.colors.text_dim), Theme::reset())
    };

    lines.push(format!(
        "{}{}{}{}",
        Theme::bold(),
        Theme::fg(&theme.colors.header_fg),
        truncate(&detail.title, width),
        Theme::reset()
    ));
    lines.push(format!("{}{}{}", Theme::fg(&theme.colors.text_normal), truncate(&detail.authors, width), Theme::reset()));
    lines.push(marker);
    lines.push(String::new());

    for (label, value) in &detail.fields {
        let value = truncate(value, width.saturating_sub(LABEL_WIDTH));
        lines.push(format!(
            "{}{label:<LABEL_WIDTH$}{}{value}{}",
            Theme::fg(&theme.colors.text_dim),
            Theme::fg(&theme.colors.text_normal),
            Theme::reset()
        ));
    }

    if !detail.description.is_empty() {
        lines.push(String::new());
        let room = (last_row + 1).saturating_sub(row + lines.len());
        let overflow = detail.description.len() > room;
        let shown = if overflow { room.saturating_sub(1) } else { room };
        for line in detail.description.iter().take(shown) {
            lines.push(format!("{}{line}{}", Theme::fg(&theme.colors.text_normal), Theme::reset()));
        }
        if overflow {
            lines.push(format!("{}...{}", Theme::fg(&theme.colors.text_dim), Theme::reset()));
        }
    }

    for current_row in row..=last_row {
        position_cursor(current_row, 1);
        print!("{}", " ".repeat(cols));
        if let Some(line) = lines.get(current_row - row) {
            position_cursor(current_row, INDENT + 1);
            print!("{line}");
        }
    }
}
