//! Bomb order panel: pick the station order by hand or by voice.

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::EasterEggMap;
use crate::services::{annotate_transcript, normalize_transcript, HeardWord, OrderedSelection};
use crate::shortcuts::{contexts, Action, ShortcutRegistry};
use crate::speech::{Recognizer, VoiceSession};

use super::component::{ContextualComponent, PanelEvent};
use super::Theme;

/// State of the bomb order panel.
#[derive(Default)]
pub struct BombOrderPanel {
    selection: OrderedSelection,
    cursor: usize,
    voice: VoiceSession,
    voice_available: bool,
    heard: Vec<HeardWord>,
    focused: bool,
}

impl BombOrderPanel {
    /// Creates an empty panel.
    #[must_use]
    pub fn new(voice_available: bool) -> Self {
        Self {
            voice_available,
            ..Self::default()
        }
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &OrderedSelection {
        &self.selection
    }

    /// Words of the last transcript.
    #[must_use]
    pub fn heard(&self) -> &[HeardWord] {
        &self.heard
    }

    /// Cursor row.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the panel is waiting for speech.
    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.voice.is_listening()
    }

    /// Marks the panel as focused.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Starts a voice session and clears the previous "Heard:" echo.
    ///
    /// # Errors
    ///
    /// Returns an error if already listening or the recognizer fails to start.
    pub fn start_listening(&mut self, recognizer: &dyn Recognizer) -> Result<()> {
        self.voice.start(recognizer)?;
        self.heard.clear();
        Ok(())
    }

    /// Replaces the selection with the stations heard in a transcript.
    pub fn apply_transcript(&mut self, transcript: &str, map: &EasterEggMap) {
        self.heard = annotate_transcript(transcript, &map.keywords);
        self.selection
            .replace(normalize_transcript(transcript, &map.keywords));
    }

    /// Polls the voice session.
    ///
    /// Returns a status update when the session finished.
    pub fn poll_voice(&mut self, map: &EasterEggMap) -> Option<PanelEvent> {
        let was_listening = self.voice.is_listening();

        if let Some(transcript) = self.voice.poll() {
            self.apply_transcript(&transcript, map);
            let count = self.selection.len();
            return Some(PanelEvent::Status(format!(
                "Heard {count} station{}",
                if count == 1 { "" } else { "s" }
            )));
        }

        if was_listening && !self.voice.is_listening() {
            return Some(PanelEvent::Status(match self.voice.last_error() {
                Some(error) => format!("Voice input failed: {error}"),
                None => "Stopped listening".to_string(),
            }));
        }

        None
    }

    fn move_cursor(&mut self, action: Action, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = match action {
            Action::NavigateUp => self.cursor.saturating_sub(1),
            Action::NavigateDown => (self.cursor + 1).min(len - 1),
            Action::JumpToFirst => 0,
            Action::JumpToLast => len - 1,
            _ => self.cursor,
        };
    }

    fn voice_line(&self, theme: &Theme, registry: &ShortcutRegistry) -> Line<'static> {
        if !self.voice_available {
            return Line::from(Span::styled(
                "Voice input unavailable. Pick stations manually.",
                Style::default().fg(theme.text_muted),
            ));
        }

        if self.voice.is_listening() {
            return Line::from(Span::styled(
                "● Listening...",
                Style::default()
                    .fg(theme.warning)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let key = registry
            .key_label(contexts::BOMB, Action::StartListening)
            .unwrap_or_default();
        Line::from(vec![
            Span::styled(format!("[{key}] "), Style::default().fg(theme.accent)),
            Span::styled("Speak the order", Style::default().fg(theme.text)),
        ])
    }

    fn heard_line(&self, theme: &Theme) -> Line<'static> {
        let mut spans = vec![Span::styled(
            "Heard: ",
            Style::default().fg(theme.text_secondary),
        )];

        for (i, word) in self.heard.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = match word.highlight {
                Some(slot) => Style::default()
                    .fg(theme.keyword_color(slot))
                    .add_modifier(Modifier::BOLD),
                None => Style::default().fg(theme.text_muted),
            };
            spans.push(Span::styled(word.text.clone(), style));
        }

        Line::from(spans)
    }
}

impl ContextualComponent for BombOrderPanel {
    type Context = EasterEggMap;
    type Event = PanelEvent;

    fn handle_input(&mut self, key: KeyEvent, map: &EasterEggMap) -> Option<PanelEvent> {
        let registry = ShortcutRegistry::new();
        let action = registry.lookup_with_fallback(contexts::BOMB, key)?;
        let entries = self.selection.display_entries(&map.stations);

        match action {
            Action::NavigateUp | Action::NavigateDown | Action::JumpToFirst | Action::JumpToLast => {
                self.move_cursor(action, entries.len());
                None
            }
            Action::ToggleStation => {
                let entry = entries.get(self.cursor)?;
                self.selection.toggle(&entry.station);
                None
            }
            Action::ResetOrder => {
                if !self.selection.can_reset() {
                    return None;
                }
                self.selection.reset();
                self.heard.clear();
                self.cursor = 0;
                Some(PanelEvent::Status("Order reset".to_string()))
            }
            Action::StartListening => {
                if !self.voice_available {
                    Some(PanelEvent::Status(
                        "Voice input unavailable: configure speech.command".to_string(),
                    ))
                } else if self.voice.is_listening() {
                    Some(PanelEvent::Status("Already listening".to_string()))
                } else {
                    Some(PanelEvent::StartListening)
                }
            }
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, map: &EasterEggMap) {
        let registry = ShortcutRegistry::new();
        let entries = self.selection.display_entries(&map.stations);
        let complete = self.selection.is_complete(&map.stations);

        let mut lines: Vec<Line> = Vec::new();

        for (i, entry) in entries.iter().enumerate() {
            let is_cursor = self.focused && i == self.cursor;
            let marker = if is_cursor { "▶ " } else { "  " };
            let position = entry
                .position
                .map_or_else(|| " ·".to_string(), |p| format!("{p:>2}"));

            let mut style = if entry.position.is_some() {
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            if is_cursor {
                style = style.bg(theme.highlight_bg);
            }

            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.accent)),
                Span::styled(format!("{position}  "), Style::default().fg(theme.text_secondary)),
                Span::styled(entry.station.to_string(), style),
            ]));
        }

        lines.push(Line::from(""));

        if complete {
            lines.push(Line::from(Span::styled(
                "Order complete",
                Style::default().fg(theme.success),
            )));
        }

        if self.selection.can_reset() {
            let key = registry
                .key_label(contexts::BOMB, Action::ResetOrder)
                .unwrap_or_default();
            lines.push(Line::from(vec![
                Span::styled(format!("[{key}] "), Style::default().fg(theme.accent)),
                Span::styled("Reset Order", Style::default().fg(theme.text)),
            ]));
        }

        lines.push(self.voice_line(theme, &registry));

        if !self.heard.is_empty() {
            lines.push(self.heard_line(theme));
        }

        let border = if self.focused {
            theme.active
        } else {
            theme.primary
        };

        let panel = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Bomb Order ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .style(Style::default().bg(theme.background))
            .wrap(Wrap { trim: false });

        f.render_widget(panel, area);
    }
}
