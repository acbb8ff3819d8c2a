//! Main UI input handler.

use anyhow::Result;
use crossterm::event;

use crate::shortcuts::ShortcutRegistry;
use crate::tui::{AppState, Component, ComponentEvent};

/// Handle input for main UI
///
/// Panel shortcuts take precedence over the global ones.
pub fn handle_main_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let registry = ShortcutRegistry::new();
    let context = state.focused_context();

    if let Some(action) = registry.lookup_with_fallback(context, key) {
        super::dispatch_action(state, action, key)
    } else {
        // No action mapped - ignore key
        Ok(false)
    }
}

/// Handle input for the help overlay
pub fn handle_help_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let Some(help) = state.help.as_mut() else {
        return Ok(false);
    };

    if let Some(ComponentEvent::Closed) = help.handle_input(key) {
        state.help = None;
        state.clear_status();
    }
    Ok(false)
}
