// Keyboard input handling.
//
// Screen switching and chart/projection controls mutate `ViewState` in place.
// Export and quit are returned as `UserCommand`s for the TUI loop to act on.

use courtside_core::chart::ChartSelector;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use super::ViewState;
use crate::protocol::{Screen, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` for keys the loop must act on, `None` when the
/// key was handled locally (or ignored).
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm emits Press and Release on some platforms; act on Press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    match key_event.code {
        KeyCode::Char('q') => return Some(UserCommand::Quit),
        KeyCode::Char('e') => return Some(UserCommand::Export),
        KeyCode::Char('1') => switch_screen(view_state, Screen::Players),
        KeyCode::Char('2') => switch_screen(view_state, Screen::Teams),
        KeyCode::Char('3') | KeyCode::Char('g') => switch_screen(view_state, Screen::Projections),
        _ => match view_state.screen {
            Screen::Players | Screen::Teams => handle_comparison_key(key_event.code, view_state),
            Screen::Projections => handle_projection_key(key_event.code, view_state),
        },
    }
    None
}

fn switch_screen(view_state: &mut ViewState, screen: Screen) {
    if view_state.screen != screen {
        debug!("switching to {} screen", screen.label());
    }
    view_state.screen = screen;
    view_state.status_message = None;
}

/// Chart kind selection on the comparison screens.
fn handle_comparison_key(code: KeyCode, view_state: &mut ViewState) {
    let Some(view) = view_state.comparison_mut() else {
        return;
    };
    match code {
        KeyCode::Char('b') => view.show(ChartSelector::Bar),
        KeyCode::Char('r') => view.show(ChartSelector::Radar),
        KeyCode::Char('l') => view.show(ChartSelector::Line),
        KeyCode::Char('d') => view.show(ChartSelector::Doughnut),
        KeyCode::Tab => view.cycle(),
        _ => {}
    }
}

/// Group, stat and mode controls on the projection screen.
fn handle_projection_key(code: KeyCode, view_state: &mut ViewState) {
    let Some(view) = view_state.projections.ready_mut() else {
        return;
    };
    match code {
        KeyCode::Char('t') | KeyCode::Right => view.cycle_group(true),
        KeyCode::Char('T') | KeyCode::Left => view.cycle_group(false),
        KeyCode::Char('s') => view.cycle_stat(),
        KeyCode::Char('m') => view.cycle_mode(),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
