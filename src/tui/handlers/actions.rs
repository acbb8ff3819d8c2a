//! Action dispatch for the main UI.

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::models::ToolKind;
use crate::shortcuts::Action;
use crate::tui::{AppState, ContextualComponent, PanelKind};

/// Dispatch an action to the appropriate handler.
///
/// Global actions are handled here; everything else goes to the focused
/// panel. Returns `true` when the application should exit.
pub fn dispatch_action(state: &mut AppState, action: Action, key: KeyEvent) -> Result<bool> {
    match action {
        Action::Quit => {
            state.should_quit = true;
            Ok(true)
        }
        Action::ToggleHelp => {
            state.open_help();
            Ok(false)
        }
        Action::NextPanel => {
            state.cycle_focus(true);
            Ok(false)
        }
        Action::PreviousPanel => {
            state.cycle_focus(false);
            Ok(false)
        }
        Action::NextMap => {
            state.cycle_map(true);
            Ok(false)
        }
        Action::PreviousMap => {
            state.cycle_map(false);
            Ok(false)
        }
        Action::ToggleChecklist => {
            state.toggle_checklist();
            Ok(false)
        }
        Action::Cancel => {
            state.clear_status();
            Ok(false)
        }
        _ => {
            forward_to_panel(state, key);
            Ok(false)
        }
    }
}

/// Forward a key to the focused panel and apply what it emits.
fn forward_to_panel(state: &mut AppState, key: KeyEvent) {
    let map = &state.catalog.maps()[state.map_index];

    let event = match state.focused_panel() {
        Some(PanelKind::Tool(ToolKind::Bomb)) => state.session.bomb.handle_input(key, map),
        Some(PanelKind::Tool(ToolKind::Valve)) => state.session.valves.handle_input(key, map),
        Some(PanelKind::Checklist) => state.session.checklist.handle_input(key, map),
        Some(PanelKind::Tool(ToolKind::ComingSoon)) | None => None,
    };

    if let Some(event) = event {
        state.handle_panel_event(event);
    }
}
