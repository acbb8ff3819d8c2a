//! Help overlay widget showing keyboard shortcuts and voice keywords.
//!
//! The shortcut sections are generated from the [`ShortcutRegistry`], so the
//! overlay never drifts from the actual bindings.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use crate::models::EasterEggMap;
use crate::shortcuts::{contexts, Action, ShortcutRegistry};

use super::component::{Component, ComponentEvent};
use super::Theme;

/// Width of the key column.
const KEY_COLUMN_WIDTH: usize = 22;

/// One line of help content, styled at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HelpLine {
    Section(String),
    Binding { keys: String, description: String },
    Keyword { slot: usize, station: String, words: String },
    Text(String),
    Blank,
}

/// Scrollable help overlay.
#[derive(Debug, Clone)]
pub struct HelpOverlay {
    lines: Vec<HelpLine>,
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    closed: bool,
}

impl HelpOverlay {
    /// Builds the help content for a map.
    #[must_use]
    pub fn new(map: &EasterEggMap, voice_available: bool) -> Self {
        let registry = ShortcutRegistry::new();
        let mut lines = Vec::new();

        for (title, context) in [
            ("GENERAL", contexts::MAIN),
            ("BOMB ORDER", contexts::BOMB),
            ("VALVES", contexts::VALVE),
            ("CHECKLIST", contexts::CHECKLIST),
        ] {
            lines.push(HelpLine::Section(title.to_string()));
            lines.push(HelpLine::Blank);
            for (action, keys) in registry.bindings_for(context) {
                let mut labels: Vec<String> = Vec::new();
                for key in keys {
                    let label = key.label();
                    if !labels.contains(&label) {
                        labels.push(label);
                    }
                }
                lines.push(HelpLine::Binding {
                    keys: labels.join(" / "),
                    description: Self::describe(context, action),
                });
            }
            lines.push(HelpLine::Blank);
        }

        if !map.keywords.is_empty() {
            lines.push(HelpLine::Section("WHAT CAN I SAY?".to_string()));
            lines.push(HelpLine::Blank);
            for group in map.keywords.grouped() {
                let slot = group
                    .keywords
                    .first()
                    .and_then(|word| map.keywords.highlight_slot(word))
                    .unwrap_or(0);
                lines.push(HelpLine::Keyword {
                    slot,
                    station: group.station.to_string(),
                    words: group.keywords.join(", "),
                });
            }
            lines.push(HelpLine::Blank);
        }

        lines.push(HelpLine::Section("VOICE INPUT".to_string()));
        lines.push(HelpLine::Blank);
        if voice_available {
            lines.push(HelpLine::Text(
                "Say the stations in order after pressing the listen key.".to_string(),
            ));
        } else {
            lines.push(HelpLine::Text(
                "No speech command is configured, so only manual selection is offered."
                    .to_string(),
            ));
        }
        lines.push(HelpLine::Text(
            "Audio is only handled by the configured local speech command. Nothing is stored."
                .to_string(),
        ));

        Self {
            lines,
            scroll_offset: 0,
            closed: false,
        }
    }

    fn describe(context: &str, action: Action) -> String {
        match (context, action) {
            (contexts::VALVE, Action::NavigateLeft) => "Green light selector".to_string(),
            (contexts::VALVE, Action::NavigateRight) => "Pink cylinder selector".to_string(),
            _ => action.description().to_string(),
        }
    }

    /// Total number of content lines.
    #[must_use]
    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.lines.len() {
            self.scroll_offset += 1;
        }
    }

    /// Scroll to the top.
    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    /// Scroll to the bottom.
    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.lines.len().saturating_sub(1);
    }

    fn styled_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        self.lines
            .iter()
            .map(|line| match line {
                HelpLine::Section(title) => Line::from(Span::styled(
                    format!("═══ {title} ═══"),
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )),
                HelpLine::Binding { keys, description } => Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{keys:<KEY_COLUMN_WIDTH$}"),
                        Style::default().fg(theme.success),
                    ),
                    Span::styled(description.clone(), Style::default().fg(theme.text)),
                ]),
                HelpLine::Keyword {
                    slot,
                    station,
                    words,
                } => Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{station:<KEY_COLUMN_WIDTH$}"),
                        Style::default()
                            .fg(theme.keyword_color(*slot))
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(words.clone(), Style::default().fg(theme.text)),
                ]),
                HelpLine::Text(text) => Line::from(Span::styled(
                    format!("  {text}"),
                    Style::default().fg(theme.text_secondary),
                )),
                HelpLine::Blank => Line::from(""),
            })
            .collect()
    }
}

impl Component for HelpOverlay {
    type Event = ComponentEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<ComponentEvent> {
        let registry = ShortcutRegistry::new();

        match registry.lookup(contexts::HELP, key)? {
            Action::NavigateUp => self.scroll_up(),
            Action::NavigateDown => self.scroll_down(),
            Action::JumpToFirst => self.scroll_to_top(),
            Action::JumpToLast => self.scroll_to_bottom(),
            Action::ToggleHelp | Action::Cancel => {
                self.closed = true;
                return Some(ComponentEvent::Closed);
            }
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // 70% width, 80% height
        let width = (area.width * 70) / 100;
        let height = (area.height * 80) / 100;
        let modal_area = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let content_area = chunks[0];
        let scrollbar_area = chunks[1];

        let visible_height = content_area.height.saturating_sub(2) as usize;
        let paragraph = Paragraph::new(self.styled_lines(theme))
            .block(
                Block::default()
                    .title(" Help ")
                    .title_bottom(Line::from(" ? / Esc to close · ↑↓ to scroll ").centered())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.background))
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, content_area);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█")
            .style(Style::default().fg(theme.primary));

        let mut scrollbar_state =
            ScrollbarState::new(self.lines.len().saturating_sub(visible_height))
                .position(self.scroll_offset);

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }

    fn should_close(&self) -> bool {
        self.closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn overlay(voice: bool) -> HelpOverlay {
        let catalog = Catalog::load().unwrap();
        HelpOverlay::new(catalog.get("gorod-krovi").unwrap(), voice)
    }

    #[test]
    fn test_content_lists_keywords_and_bindings() {
        let help = overlay(false);
        assert!(help.lines.iter().any(|line| matches!(
            line,
            HelpLine::Keyword { station, words, .. }
                if station == "Infirmary" && words.contains("beds")
        )));
        assert!(help.lines.iter().any(|line| matches!(
            line,
            HelpLine::Binding { description, .. } if description == "Reset order"
        )));
    }

    #[test]
    fn test_scroll_bounds() {
        let mut help = overlay(true);
        help.scroll_up();
        assert_eq!(help.scroll_offset, 0);
        help.scroll_to_bottom();
        assert_eq!(help.scroll_offset, help.total_lines() - 1);
        help.scroll_down();
        assert_eq!(help.scroll_offset, help.total_lines() - 1);
    }

    #[test]
    fn test_closes_on_escape() {
        let mut help = overlay(true);
        let event = help.handle_input(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(event, Some(ComponentEvent::Closed));
        assert!(help.should_close());
    }
}
