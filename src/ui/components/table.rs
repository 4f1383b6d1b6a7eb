//! Book list renderer.
//!
//! Each row reads `♥ TITLE  YEAR  AUTHORS`, with the favourite marker in its
//! own color, query matches highlighted in the title, and the cursor row
//! filled with the selection background.

use crate::app::state::TITLE_COLUMN_WIDTH;
use crate::ui::helpers::{self, char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

const MARKER_WIDTH: usize = 2;
const YEAR_WIDTH: usize = 6;

/// Renders the column headers at `row`, returning the next row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    let line = format!(
        "{}{:<title$}{:<year$}{}",
        " ".repeat(MARKER_WIDTH),
        "TITLE",
        "YEAR",
        "AUTHORS",
        title = TITLE_COLUMN_WIDTH,
        year = YEAR_WIDTH
    );
    print!("{line}");
    print!("{}", " ".repeat(cols.saturating_sub(char_len(&line))));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the book rows starting at `row`.
///
/// # Parameters
///
/// * `row` - Row of the first book (1-indexed)
/// * `items` - Rows already windowed by the view model
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The row following the last rendered book
pub fn render_table_rows(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_table_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = |theme: &Theme| {
        if item.is_selected {
            format!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg))
        } else {
            Theme::fg(&theme.colors.text_normal)
        }
    };

    print!("{}", base(theme));
    if item.is_favourite {
        print!("{}♥ {}", Theme::fg(&theme.colors.favourite_fg), base(theme));
    } else {
        print!("  ");
    }

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(TITLE_COLUMN_WIDTH.saturating_sub(char_len(&item.title))));

    let year = item.year.map(|y| y.to_string()).unwrap_or_default();
    print!("{year:<YEAR_WIDTH$}");
    print!("{}", item.authors);

    let line_len = MARKER_WIDTH + TITLE_COLUMN_WIDTH + YEAR_WIDTH.max(char_len(&year)) + char_len(&item.authors);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
