//! Top-level rendering coordinator.
//!
//! Rendering happens in two steps: [`AppState::compute_viewmodel`] turns the
//! state into a [`UIViewModel`], then the components print it as ANSI.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the complete plugin UI to stdout.
///
/// This is the main entry point for rendering, called from the plugin's
/// `render` hook.
///
/// # Parameters
///
/// * `state` - Application state to render
/// * `rows` - Pane height in rows
/// * `cols` - Pane width in columns
///
/// # Example
///
/// ```rust
/// use bookfinder::{initialize, Config};
///
/// let state = initialize(&Config::default());
/// bookfinder::ui::render(&state, 24, 80);
/// ```
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Picks the detail layout while a book is selected, the list layout
/// otherwise.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if let Some(detail) = &vm.detail {
        components::render_detail_layout(vm, detail, theme, cols, rows);
    } else {
        components::render_list_layout(vm, theme, cols, rows);
    }
}
