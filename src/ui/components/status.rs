//! Status line renderer.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

/// Renders the status message at `row`, or a blank line when there is none.
///
/// Errors are drawn bold in the error color, loading and no-results messages
/// in the status color, and the idle prompt dimmed.
///
/// # Returns
///
/// The next available row position (row + 1)
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let color = match status.kind {
        StatusKind::Hint => &theme.colors.text_dim,
        StatusKind::Loading | StatusKind::NoResults => &theme.colors.status_fg,
        StatusKind::Error => &theme.colors.error_fg,
    };

    let message = truncate(&format!(" {}", status.message), cols);
    print!("{}", Theme::fg(color));
    if status.kind == StatusKind::Error {
        print!("{}", Theme::bold());
    }
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(char_len(&message))));
    print!("{}", Theme::reset());
    row + 1
}
