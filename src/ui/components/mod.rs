//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`search`]: Search input box and recent-search chips
//! - [`status`]: Loading / error / no-results / hint line
//! - [`table`]: Book list (marker, TITLE, YEAR, AUTHORS)
//! - [`detail`]: Detail overlay for the selected book
//! - [`footer`]: Key hints
//!
//! # Layouts
//!
//! - [`render_list_layout`]: the search bar above the book list
//! - [`render_detail_layout`]: the detail overlay filling the body

mod detail;
mod footer;
mod header;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailInfo, UIViewModel};

use detail::render_detail;
use footer::render_footer;
use header::render_header;
use search::{render_recent_chips, render_search_bar};
use status::render_status;
use table::{render_table_headers, render_table_rows};

/// Renders a horizontal border line at `row`, returning the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Clears rows `from..to`.
fn clear_rows(from: usize, to: usize, cols: usize) {
    for row in from..to {
        position_cursor(row, 1);
        print!("{}", " ".repeat(cols));
    }
}

/// Renders the list layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search Bar - 3 lines]
/// [Recent chips]
/// [Status line]
/// [Table Headers]
/// [Table Rows]
/// [Blank padding to fill screen]
/// [Border]
/// [Footer]
/// ```
pub fn render_list_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_recent_chips(current_row, &vm.recent, theme, cols);
    current_row = render_status(current_row, vm.status.as_ref(), theme, cols);
    current_row = render_table_headers(current_row, theme, cols);
    current_row = render_table_rows(current_row, &vm.display_items, theme, cols);

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);

    clear_rows(current_row, border_row, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}

/// Renders the detail overlay layout: header, border, detail body, border,
/// footer.
pub fn render_detail_layout(vm: &UIViewModel, detail: &DetailInfo, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows;
    let border_row = footer_row.saturating_sub(1);

    if border_row > current_row {
        render_detail(current_row, border_row - 1, detail, theme, cols);
    }
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
