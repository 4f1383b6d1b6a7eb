//! Footer component renderer.
//!
//! Displays the key hints for the current focus on the last row.

use crate::ui::helpers::{char_len, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer with key hints at the specified row.
///
/// The hints are centered and drawn in the dimmed text color. Hints wider
/// than the pane are truncated with `...`.
///
/// # Parameters
///
/// * `row` - Row position to render the footer (1-indexed, usually the last row)
/// * `footer` - Footer information (key hint text)
/// * `theme` - Active color theme
/// * `cols` - Pane width in columns
///
/// # Returns
///
/// The next available row position (row + 1)
///
/// # Example Output
///
/// ```text
///      j/k: move  enter: details  f: favourite  v: favourites  /: search
/// ```
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = char_len(&help_text);
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
