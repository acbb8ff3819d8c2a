//! Checklist panel: a collapsible tree of easter-egg steps.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::models::EasterEggMap;
use crate::services::{ChecklistRow, ChecklistState};
use crate::shortcuts::{contexts, Action, ShortcutRegistry};

use super::component::{ContextualComponent, PanelEvent};
use super::Theme;

/// State of the checklist panel.
#[derive(Debug, Default)]
pub struct ChecklistPanel {
    state: ChecklistState,
    cursor: usize,
    focused: bool,
}

impl ChecklistPanel {
    /// Creates a panel with nothing checked and everything expanded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checked and expanded flags.
    #[must_use]
    pub const fn state(&self) -> &ChecklistState {
        &self.state
    }

    /// Cursor row among the visible rows.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Marks the panel as focused.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn clamp_cursor(&mut self, rows: usize) {
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }

    fn row_line(row: &ChecklistRow, theme: &Theme) -> Line<'static> {
        let indent = "  ".repeat(row.depth);
        let fold = match (row.has_children, row.expanded) {
            (false, _) => "  ",
            (true, true) => "▾ ",
            (true, false) => "▸ ",
        };
        let (check, label_style) = if row.checked {
            (
                "[x] ",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            ("[ ] ", Style::default().fg(theme.text))
        };

        Line::from(vec![
            Span::raw(indent),
            Span::styled(fold, Style::default().fg(theme.text_secondary)),
            Span::styled(check, Style::default().fg(theme.accent)),
            Span::styled(row.label.clone(), label_style),
        ])
    }
}

impl ContextualComponent for ChecklistPanel {
    type Context = EasterEggMap;
    type Event = PanelEvent;

    fn handle_input(&mut self, key: KeyEvent, map: &EasterEggMap) -> Option<PanelEvent> {
        let registry = ShortcutRegistry::new();
        let action = registry.lookup_with_fallback(contexts::CHECKLIST, key)?;
        let forest = &map.checklist;
        let rows = self.state.visible_rows(forest);

        match action {
            Action::NavigateUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            Action::NavigateDown => {
                self.cursor += 1;
                self.clamp_cursor(rows.len());
                None
            }
            Action::JumpToFirst => {
                self.cursor = 0;
                None
            }
            Action::JumpToLast => {
                self.cursor = rows.len().saturating_sub(1);
                None
            }
            Action::ToggleChecked => {
                let row = rows.get(self.cursor)?;
                self.state.set_checked(forest, &row.id, !row.checked);
                None
            }
            Action::ToggleExpanded | Action::NavigateLeft | Action::NavigateRight => {
                let row = rows.get(self.cursor)?;
                if !row.has_children {
                    return None;
                }
                // left only collapses, right only expands
                let wanted = match action {
                    Action::NavigateLeft => false,
                    Action::NavigateRight => true,
                    _ => !row.expanded,
                };
                if wanted != row.expanded {
                    self.state.toggle_expansion(forest, &row.id);
                }
                let visible = self.state.visible_rows(forest).len();
                self.clamp_cursor(visible);
                None
            }
            Action::ToggleAllExpanded => {
                self.state.toggle_all_expansion(forest);
                let visible = self.state.visible_rows(forest).len();
                self.clamp_cursor(visible);
                None
            }
            Action::ClearChecklist => {
                self.state.clear_all(forest);
                Some(PanelEvent::Status("Checklist cleared".to_string()))
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, map: &EasterEggMap) {
        let forest = &map.checklist;
        let rows = self.state.visible_rows(forest);
        let total = crate::models::checklist::count_items(forest);
        let done = self.state.checked_count(forest);

        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| ListItem::new(Self::row_line(row, theme)))
            .collect();

        let border = if self.focused {
            theme.active
        } else {
            theme.primary
        };
        let title = format!(
            " Checklist {done}/{total} · [e] {} ",
            self.state.expand_all_label()
        );

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .style(Style::default().bg(theme.background))
            .highlight_style(
                Style::default()
                    .bg(theme.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            );

        let mut list_state = ListState::default();
        if self.focused && !rows.is_empty() {
            list_state.select(Some(self.cursor));
        }

        f.render_stateful_widget(list, area, &mut list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn gorod_krovi() -> EasterEggMap {
        Catalog::load().unwrap().get("gorod-krovi").unwrap().clone()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_space_checks_row_under_cursor() {
        let map = gorod_krovi();
        let mut panel = ChecklistPanel::new();

        // rows: power, egg, egg-get, ...
        panel.handle_input(key(KeyCode::Down), &map);
        panel.handle_input(key(KeyCode::Char(' ')), &map);

        assert!(panel.state().is_checked("egg"));
        assert!(panel.state().is_checked("egg-napalm-get"));
        assert!(!panel.state().is_checked("power"));
    }

    #[test]
    fn test_collapse_hides_children() {
        let map = gorod_krovi();
        let mut panel = ChecklistPanel::new();
        let all = panel.state().visible_rows(&map.checklist).len();

        panel.handle_input(key(KeyCode::Down), &map);
        panel.handle_input(key(KeyCode::Left), &map);
        assert_eq!(panel.state().visible_rows(&map.checklist).len(), 2);

        // left on a collapsed row does nothing
        panel.handle_input(key(KeyCode::Left), &map);
        assert!(!panel.state().is_expanded("egg"));

        panel.handle_input(key(KeyCode::Enter), &map);
        assert_eq!(panel.state().visible_rows(&map.checklist).len(), all);
    }

    #[test]
    fn test_toggle_all_then_clear() {
        let map = gorod_krovi();
        let mut panel = ChecklistPanel::new();

        panel.handle_input(key(KeyCode::Char('e')), &map);
        assert_eq!(panel.state().expand_all_label(), "Collapse All");
        panel.handle_input(key(KeyCode::Char('e')), &map);
        assert_eq!(panel.state().expand_all_label(), "Expand All");
        assert_eq!(panel.state().visible_rows(&map.checklist).len(), 2);

        panel.handle_input(key(KeyCode::Char(' ')), &map);
        assert!(panel.state().is_checked("power"));

        let event = panel.handle_input(
            KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT),
            &map,
        );
        assert_eq!(
            event,
            Some(PanelEvent::Status("Checklist cleared".to_string()))
        );
        assert_eq!(panel.state().checked_count(&map.checklist), 0);
    }

    #[test]
    fn test_cursor_clamped_after_collapse() {
        let map = gorod_krovi();
        let mut panel = ChecklistPanel::new();

        panel.handle_input(key(KeyCode::End), &map);
        assert!(panel.cursor() > 1);
        panel.handle_input(key(KeyCode::Char('e')), &map);
        panel.handle_input(key(KeyCode::Char('e')), &map);
        assert_eq!(panel.cursor(), 1);
    }
}
