//! Centralized shortcut and action system.
//!
//! This module provides a unified system for keyboard shortcuts and actions,
//! connecting help text definitions with actual event handling logic.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Shortcut contexts.
pub mod contexts {
    /// Global shortcuts, active in every panel
    pub const MAIN: &str = "main";
    /// Bomb order panel
    pub const BOMB: &str = "bomb";
    /// Valve tracker panel
    pub const VALVE: &str = "valve";
    /// Checklist panel
    pub const CHECKLIST: &str = "checklist";
    /// Help overlay
    pub const HELP: &str = "help";
}

/// All possible actions in the application.
///
/// This enum represents every action a user can take. It serves as the
/// bridge between keyboard shortcuts and application behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === NAVIGATION ===
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    JumpToFirst,
    JumpToLast,

    // === PANELS & MAPS ===
    NextPanel,
    PreviousPanel,
    NextMap,
    PreviousMap,
    ToggleChecklist,

    // === BOMB ORDER ===
    ToggleStation,
    ResetOrder,
    StartListening,

    // === VALVES ===
    ClearSelector,
    ResetValves,

    // === CHECKLIST ===
    ToggleChecked,
    ToggleExpanded,
    ToggleAllExpanded,
    ClearChecklist,

    // === HELP ===
    ToggleHelp,

    // === GENERAL ===
    Quit,
    Cancel,
}

impl Action {
    /// Get the action ID string
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::NavigateUp => "navigate_up",
            Self::NavigateDown => "navigate_down",
            Self::NavigateLeft => "navigate_left",
            Self::NavigateRight => "navigate_right",
            Self::JumpToFirst => "jump_first",
            Self::JumpToLast => "jump_last",

            Self::NextPanel => "next_panel",
            Self::PreviousPanel => "previous_panel",
            Self::NextMap => "next_map",
            Self::PreviousMap => "previous_map",
            Self::ToggleChecklist => "toggle_checklist",

            Self::ToggleStation => "toggle_station",
            Self::ResetOrder => "reset_order",
            Self::StartListening => "start_listening",

            Self::ClearSelector => "clear_selector",
            Self::ResetValves => "reset_valves",

            Self::ToggleChecked => "toggle_checked",
            Self::ToggleExpanded => "toggle_expanded",
            Self::ToggleAllExpanded => "toggle_all_expanded",
            Self::ClearChecklist => "clear_checklist",

            Self::ToggleHelp => "toggle_help",

            Self::Quit => "quit",
            Self::Cancel => "cancel",
        }
    }

    /// Short description shown in the help overlay and status bar.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::NavigateUp => "Move up",
            Self::NavigateDown => "Move down",
            Self::NavigateLeft => "Previous selector / collapse",
            Self::NavigateRight => "Next selector / expand",
            Self::JumpToFirst => "Jump to first",
            Self::JumpToLast => "Jump to last",

            Self::NextPanel => "Next tool",
            Self::PreviousPanel => "Previous tool",
            Self::NextMap => "Next map",
            Self::PreviousMap => "Previous map",
            Self::ToggleChecklist => "Show/hide checklist",

            Self::ToggleStation => "Pick/unpick station",
            Self::ResetOrder => "Reset order",
            Self::StartListening => "Speak the order",

            Self::ClearSelector => "Clear selector",
            Self::ResetValves => "Reset valves",

            Self::ToggleChecked => "Check/uncheck step",
            Self::ToggleExpanded => "Expand/collapse step",
            Self::ToggleAllExpanded => "Expand/collapse all",
            Self::ClearChecklist => "Clear all checks",

            Self::ToggleHelp => "Toggle help",

            Self::Quit => "Quit",
            Self::Cancel => "Close",
        }
    }
}

/// Shortcut registry that maps key events to actions for a given context.
///
/// This is the central source of truth for all keyboard shortcuts in the application.
pub struct ShortcutRegistry {
    /// Maps (context, key_binding) to Action
    bindings: HashMap<(String, KeyBinding), Action>,
    /// Registration order, used to list shortcuts
    order: Vec<(String, KeyBinding, Action)>,
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Modifier keys
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Human-readable key name (e.g., "Ctrl+Q", "Shift+X", "Space").
    #[must_use]
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            other => format!("{other:?}"),
        };

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{key}")
        } else if self.modifiers.contains(KeyModifiers::ALT) {
            format!("Alt+{key}")
        } else if self.modifiers.contains(KeyModifiers::SHIFT) && self.code != KeyCode::BackTab {
            format!("Shift+{}", key.to_uppercase())
        } else {
            key
        }
    }
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
            order: Vec::new(),
        };

        registry.register_main_shortcuts();
        registry.register_bomb_shortcuts();
        registry.register_valve_shortcuts();
        registry.register_checklist_shortcuts();
        registry.register_help_shortcuts();
        registry
    }

    /// Register all shortcuts for the main context.
    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::MAIN;

        // === NAVIGATION ===
        self.register(ctx, K::Up, M::NONE, Action::NavigateUp);
        self.register(ctx, K::Down, M::NONE, Action::NavigateDown);
        self.register(ctx, K::Left, M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Right, M::NONE, Action::NavigateRight);
        self.register(ctx, K::Char('k'), M::NONE, Action::NavigateUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::NavigateDown);
        self.register(ctx, K::Char('h'), M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Char('l'), M::NONE, Action::NavigateRight);
        self.register(ctx, K::Home, M::NONE, Action::JumpToFirst);
        self.register(ctx, K::End, M::NONE, Action::JumpToLast);

        // === PANELS & MAPS ===
        self.register(ctx, K::Tab, M::NONE, Action::NextPanel);
        self.register(ctx, K::BackTab, M::NONE, Action::PreviousPanel);
        self.register(ctx, K::BackTab, M::SHIFT, Action::PreviousPanel);
        self.register(ctx, K::Char(']'), M::NONE, Action::NextMap);
        self.register(ctx, K::Char('['), M::NONE, Action::PreviousMap);
        self.register(ctx, K::Char('c'), M::NONE, Action::ToggleChecklist);

        // === HELP ===
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);

        // === GENERAL ===
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);
        self.register(ctx, K::Char('c'), M::CONTROL, Action::Quit);
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
    }

    /// Register shortcuts for the bomb order panel.
    fn register_bomb_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::BOMB;

        self.register(ctx, K::Enter, M::NONE, Action::ToggleStation);
        self.register(ctx, K::Char(' '), M::NONE, Action::ToggleStation);
        self.register(ctx, K::Char('r'), M::NONE, Action::ResetOrder);
        self.register(ctx, K::Char('v'), M::NONE, Action::StartListening);
    }

    /// Register shortcuts for the valve tracker panel.
    fn register_valve_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::VALVE;

        self.register(ctx, K::Backspace, M::NONE, Action::ClearSelector);
        self.register(ctx, K::Delete, M::NONE, Action::ClearSelector);
        self.register(ctx, K::Char('r'), M::NONE, Action::ResetValves);
    }

    /// Register shortcuts for the checklist panel.
    fn register_checklist_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::CHECKLIST;

        self.register(ctx, K::Char(' '), M::NONE, Action::ToggleChecked);
        self.register(ctx, K::Enter, M::NONE, Action::ToggleExpanded);
        self.register(ctx, K::Char('e'), M::NONE, Action::ToggleAllExpanded);
        self.register(ctx, K::Char('X'), M::SHIFT, Action::ClearChecklist);
    }

    /// Register shortcuts for the help overlay.
    fn register_help_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = contexts::HELP;

        self.register(ctx, K::Up, M::NONE, Action::NavigateUp);
        self.register(ctx, K::Down, M::NONE, Action::NavigateDown);
        self.register(ctx, K::Char('k'), M::NONE, Action::NavigateUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::NavigateDown);
        self.register(ctx, K::Home, M::NONE, Action::JumpToFirst);
        self.register(ctx, K::End, M::NONE, Action::JumpToLast);
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
    }

    /// Register a shortcut binding.
    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
        self.order.push((context.to_string(), binding, action));
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings.get(&(context.to_string(), binding)).copied()
    }

    /// Looks up a panel shortcut, falling back to the main context.
    #[must_use]
    pub fn lookup_with_fallback(&self, context: &str, event: KeyEvent) -> Option<Action> {
        self.lookup(context, event)
            .or_else(|| self.lookup(contexts::MAIN, event))
    }

    /// Check if a key event matches a specific action in the given context.
    #[must_use]
    pub fn matches(&self, context: &str, event: KeyEvent, action: Action) -> bool {
        self.lookup(context, event) == Some(action)
    }

    /// Shortcuts of a context grouped by action, in registration order.
    ///
    /// Each entry lists every key bound to the action.
    #[must_use]
    pub fn bindings_for(&self, context: &str) -> Vec<(Action, Vec<KeyBinding>)> {
        let mut grouped: Vec<(Action, Vec<KeyBinding>)> = Vec::new();

        for (ctx, binding, action) in &self.order {
            if ctx != context {
                continue;
            }
            match grouped.iter_mut().find(|(a, _)| a == action) {
                Some((_, keys)) => keys.push(*binding),
                None => grouped.push((*action, vec![*binding])),
            }
        }

        grouped
    }

    /// First key bound to an action, as a label.
    #[must_use]
    pub fn key_label(&self, context: &str, action: Action) -> Option<String> {
        self.order
            .iter()
            .find(|(ctx, _, a)| ctx == context && *a == action)
            .map(|(_, binding, _)| binding.label())
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_lookup() {
        let registry = ShortcutRegistry::new();

        let event = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(registry.lookup(contexts::MAIN, event), Some(Action::NavigateUp));

        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(registry.lookup(contexts::MAIN, event), Some(Action::Quit));
    }

    #[test]
    fn test_panel_shortcuts_take_precedence() {
        let registry = ShortcutRegistry::new();

        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(
            registry.lookup_with_fallback(contexts::BOMB, space),
            Some(Action::ToggleStation)
        );
        assert_eq!(
            registry.lookup_with_fallback(contexts::CHECKLIST, space),
            Some(Action::ToggleChecked)
        );

        let r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(
            registry.lookup_with_fallback(contexts::VALVE, r),
            Some(Action::ResetValves)
        );

        // falls back to the main context
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(
            registry.lookup_with_fallback(contexts::CHECKLIST, tab),
            Some(Action::NextPanel)
        );
    }

    #[test]
    fn test_vim_navigation() {
        let registry = ShortcutRegistry::new();

        assert_eq!(
            registry.lookup(
                contexts::MAIN,
                KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE)
            ),
            Some(Action::NavigateDown)
        );
        assert_eq!(
            registry.lookup(
                contexts::MAIN,
                KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE)
            ),
            Some(Action::NavigateUp)
        );
    }

    #[test]
    fn test_bindings_for_groups_keys() {
        let registry = ShortcutRegistry::new();
        let bindings = registry.bindings_for(contexts::BOMB);

        let (action, keys) = &bindings[0];
        assert_eq!(*action, Action::ToggleStation);
        assert_eq!(keys.len(), 2);
        assert_eq!(bindings.len(), 3);
    }

    #[test]
    fn test_key_labels() {
        assert_eq!(
            KeyBinding::new(KeyCode::Char('q'), KeyModifiers::CONTROL).label(),
            "Ctrl+q"
        );
        assert_eq!(
            KeyBinding::new(KeyCode::Char('X'), KeyModifiers::SHIFT).label(),
            "Shift+X"
        );
        assert_eq!(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT).label(),
            "Shift+Tab"
        );
        assert_eq!(
            ShortcutRegistry::new()
                .key_label(contexts::BOMB, Action::StartListening)
                .as_deref(),
            Some("v")
        );
    }
}
