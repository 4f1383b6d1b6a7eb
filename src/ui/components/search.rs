//! Search bar and recent-search chips.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{RecentChip, SearchBarInfo};

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Longest query shown on a chip.
const CHIP_QUERY_WIDTH: usize = 18;

/// Renders the 3-line search box at `row`.
///
/// # Parameters
///
/// * `row` - Top row of the box (1-indexed)
/// * `search` - Input buffer and focus flag
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The row below the box (row + 3)
///
/// # Layout
///
/// ```text
/// [margin] ┌──────────────────┐ [margin]
/// [margin] │ Search: le guin▏ │ [margin]
/// [margin] └──────────────────┘ [margin]
/// ```
///
/// The border takes the accent color and a caret is drawn only while the
/// box has focus. Long input is shown by its tail so the caret stays visible.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border_color = if search.focused {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let prefix = " Search: ";
    let caret = if search.focused { "▏" } else { "" };
    let room = inner_width.saturating_sub(char_len(prefix) + char_len(caret) + 1);
    let input_len = char_len(&search.input);
    let shown: String = search.input.chars().skip(input_len.saturating_sub(room)).collect();
    let search_text = format!("{prefix}{shown}{caret}");
    let padding = inner_width.saturating_sub(char_len(&search_text));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border_color));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}

/// Renders the numbered recent-search chips on one line at `row`.
///
/// Each chip shows the number key that re-runs it. Chips that do not fit
/// the pane width are left out; an empty list leaves a blank line.
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Example Output
///
/// ```text
///      Recent: [1] dune  [2] le guin  [3] the left hand of darkne...
/// ```
pub fn render_recent_chips(row: usize, chips: &[RecentChip], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));

    let mut used = SEARCH_BOX_MARGIN;
    if !chips.is_empty() {
        let label = "Recent: ";
        print!("{}{label}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());
        used += char_len(label);
    }

    for chip in chips {
        let text = format!("[{}] {}  ", chip.number, truncate(&chip.query, CHIP_QUERY_WIDTH));
        let len = char_len(&text);
        if used + len > cols {
            break;
        }
        print!("{}{}{}", Theme::fg(&theme.colors.text_normal), text, Theme::reset());
        used += len;
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}
