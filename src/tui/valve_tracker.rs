//! Valve tracker panel: two station selectors and the resolved valve values.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::models::{EasterEggMap, Station};
use crate::services::ValveSelection;
use crate::shortcuts::{contexts, Action, ShortcutRegistry};

use super::component::{ContextualComponent, PanelEvent};
use super::Theme;

/// Which selector receives up/down input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selector {
    /// Green light
    #[default]
    Start,
    /// Pink cylinder
    End,
}

impl Selector {
    /// Label shown next to the selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Green light",
            Self::End => "Pink cylinder",
        }
    }
}

/// State of the valve tracker panel.
#[derive(Debug, Default)]
pub struct ValveTrackerPanel {
    selection: ValveSelection,
    active: Selector,
    focused: bool,
}

impl ValveTrackerPanel {
    /// Creates a panel with both selectors empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &ValveSelection {
        &self.selection
    }

    /// Selector that receives up/down input.
    #[must_use]
    pub const fn active(&self) -> Selector {
        self.active
    }

    /// Marks the panel as focused.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn current(&self) -> Option<&Station> {
        match self.active {
            Selector::Start => self.selection.start(),
            Selector::End => self.selection.end(),
        }
    }

    fn set_current(&mut self, station: Option<Station>) {
        match self.active {
            Selector::Start => self.selection.set_start(station),
            Selector::End => self.selection.set_end(station),
        };
    }

    /// Moves the active selector through `[None, options...]`.
    fn cycle(&mut self, stations: &[Station], forward: bool) {
        let options = match self.active {
            Selector::Start => self.selection.start_options(stations),
            Selector::End => self.selection.end_options(stations),
        };

        // index 0 is the empty choice
        let len = options.len() + 1;
        let index = self
            .current()
            .and_then(|current| options.iter().position(|s| *s == current))
            .map_or(0, |i| i + 1);

        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };

        let station = next.checked_sub(1).map(|i| options[i].clone());
        self.set_current(station);
    }

    fn selector_line(&self, selector: Selector, theme: &Theme) -> Line<'static> {
        let value = match selector {
            Selector::Start => self.selection.start(),
            Selector::End => self.selection.end(),
        };
        let is_active = self.focused && self.active == selector;

        let marker = if is_active { "▶ " } else { "  " };
        let mut value_style = Style::default().fg(theme.text);
        if is_active {
            value_style = value_style.bg(theme.highlight_bg).add_modifier(Modifier::BOLD);
        }

        Line::from(vec![
            Span::styled(marker, Style::default().fg(theme.accent)),
            Span::styled(
                format!("{:<14}", format!("{}:", selector.label())),
                Style::default().fg(theme.text_secondary),
            ),
            Span::styled(
                format!(" ◀ {} ▶ ", value.map_or("None", Station::as_str)),
                value_style,
            ),
        ])
    }
}

impl ContextualComponent for ValveTrackerPanel {
    type Context = EasterEggMap;
    type Event = PanelEvent;

    fn handle_input(&mut self, key: KeyEvent, map: &EasterEggMap) -> Option<PanelEvent> {
        let registry = ShortcutRegistry::new();
        let action = registry.lookup_with_fallback(contexts::VALVE, key)?;

        match action {
            Action::NavigateLeft => {
                self.active = Selector::Start;
                None
            }
            Action::NavigateRight => {
                self.active = Selector::End;
                None
            }
            Action::NavigateUp => {
                self.cycle(&map.stations, false);
                None
            }
            Action::NavigateDown => {
                self.cycle(&map.stations, true);
                None
            }
            Action::ClearSelector => {
                self.set_current(None);
                None
            }
            Action::ResetValves => {
                self.selection.reset();
                self.active = Selector::Start;
                Some(PanelEvent::Status("Valves reset".to_string()))
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, map: &EasterEggMap) {
        let border = if self.focused {
            theme.active
        } else {
            theme.primary
        };
        let block = Block::default()
            .title(" Valves ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(inner);

        let selectors = Paragraph::new(vec![
            self.selector_line(Selector::Start, theme),
            self.selector_line(Selector::End, theme),
        ]);
        f.render_widget(selectors, chunks[0]);

        if self.selection.start().is_none() || self.selection.end().is_none() {
            let hint = Paragraph::new(Line::from(Span::styled(
                "Pick the green light and the pink cylinder",
                Style::default().fg(theme.text_muted),
            )));
            f.render_widget(hint, chunks[1]);
            return;
        }

        let assignment = self.selection.assignment(&map.valves, &map.stations);
        let rows: Vec<Row> = assignment
            .sorted()
            .into_iter()
            .map(|reading| {
                let value_style = if reading.value == 0 {
                    Style::default().fg(theme.text_muted)
                } else {
                    Style::default()
                        .fg(theme.success)
                        .add_modifier(Modifier::BOLD)
                };
                Row::new(vec![
                    Span::styled(reading.station.to_string(), Style::default().fg(theme.text)),
                    Span::styled(reading.display_value(), value_style),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Min(18), Constraint::Length(5)])
            .header(
                Row::new(vec!["Station", "Valve"])
                    .style(Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)),
            );
        f.render_widget(table, chunks[1]);
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
    fn test_cycle_includes_none() {
        let map = gorod_krovi();
        let mut panel = ValveTrackerPanel::new();

        panel.handle_input(key(KeyCode::Down), &map);
        assert_eq!(panel.selection().start(), Some(&Station::from("Supply Depot")));

        panel.handle_input(key(KeyCode::Up), &map);
        assert_eq!(panel.selection().start(), None);

        panel.handle_input(key(KeyCode::Up), &map);
        assert_eq!(
            panel.selection().start(),
            Some(&Station::from("Department Store"))
        );
    }

    #[test]
    fn test_end_selector_skips_start_station() {
        let map = gorod_krovi();
        let mut panel = ValveTrackerPanel::new();

        panel.handle_input(key(KeyCode::Down), &map);
        panel.handle_input(key(KeyCode::Right), &map);
        assert_eq!(panel.active(), Selector::End);

        panel.handle_input(key(KeyCode::Down), &map);
        assert_eq!(panel.selection().end(), Some(&Station::from("Infirmary")));

        let values = panel.selection().assignment(&map.valves, &map.stations);
        assert_eq!(values.value_of(&Station::from("Armory")), 1);
        assert_eq!(values.value_of(&Station::from("Supply Depot")), 0);
    }

    #[test]
    fn test_clear_and_reset() {
        let map = gorod_krovi();
        let mut panel = ValveTrackerPanel::new();

        panel.handle_input(key(KeyCode::Down), &map);
        panel.handle_input(key(KeyCode::Backspace), &map);
        assert_eq!(panel.selection().start(), None);

        panel.handle_input(key(KeyCode::Down), &map);
        panel.handle_input(key(KeyCode::Right), &map);
        panel.handle_input(key(KeyCode::Down), &map);
        let event = panel.handle_input(key(KeyCode::Char('r')), &map);
        assert_eq!(event, Some(PanelEvent::Status("Valves reset".to_string())));
        assert_eq!(panel.selection(), &ValveSelection::new());
        assert_eq!(panel.active(), Selector::Start);
    }
}
