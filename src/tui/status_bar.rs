//! Status bar widget for displaying status messages and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::shortcuts::{contexts, Action, ShortcutRegistry};

use super::{AppState, Theme};

/// Number of panel hints shown when there is no message.
const MAX_HINTS: usize = 5;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let registry = ShortcutRegistry::new();
        let mut content_lines: Vec<Line> = Vec::new();

        // First line: error, status message, or hints
        if let Some(error) = &state.error_message {
            content_lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::raw(error.as_str()),
            ]));
        } else if !state.status_message.is_empty() {
            content_lines.push(Line::from(state.status_message.as_str()));
        } else {
            content_lines.push(Self::hints_line(&registry, state.focused_context(), theme));
        }

        content_lines.push(Self::voice_line(state, theme));

        let map = state.current_map();
        content_lines.push(Line::from(vec![
            Span::styled("Map: ", Style::default().fg(theme.primary)),
            Span::styled(map.name.clone(), Style::default().fg(theme.text)),
            Span::styled(
                format!("  ({:?} layout)", state.layout_mode),
                Style::default().fg(theme.text_muted),
            ),
        ]));

        // 6 height - 2 for borders - 1 for help = 3 for content
        const MAX_CONTENT_LINES: usize = 3;

        let padding_needed = MAX_CONTENT_LINES.saturating_sub(content_lines.len());
        let mut status_text: Vec<Line> = content_lines.into_iter().take(MAX_CONTENT_LINES).collect();
        for _ in 0..padding_needed {
            status_text.push(Line::from(""));
        }
        status_text.push(Self::help_line(&registry, theme));

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    fn voice_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let (text, color) = if !state.voice_available() {
            ("manual only", theme.text_muted)
        } else if state.session.bomb.is_listening() {
            ("listening", theme.warning)
        } else {
            ("ready", theme.success)
        };

        Line::from(vec![
            Span::styled("Voice: ", Style::default().fg(theme.primary)),
            Span::styled(text, Style::default().fg(color)),
        ])
    }

    /// Top shortcuts of the focused panel
    fn hints_line(registry: &ShortcutRegistry, context: &str, theme: &Theme) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();

        for (i, (action, keys)) in registry
            .bindings_for(context)
            .into_iter()
            .take(MAX_HINTS)
            .enumerate()
        {
            let Some(key) = keys.first() else {
                continue;
            };
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                key.label(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                action.description(),
                Style::default().fg(theme.text_muted),
            ));
        }

        Line::from(spans)
    }

    /// Global shortcuts, always shown at the bottom
    fn help_line(registry: &ShortcutRegistry, theme: &Theme) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();

        for action in [
            Action::ToggleHelp,
            Action::NextPanel,
            Action::NextMap,
            Action::ToggleChecklist,
            Action::Quit,
        ] {
            let Some(key) = registry.key_label(contexts::MAIN, action) else {
                continue;
            };
            if !spans.is_empty() {
                spans.push(Span::styled(" | ", Style::default().fg(theme.text_muted)));
            }
            spans.push(Span::styled(key, Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                format!(" {}", action.description()),
                Style::default().fg(theme.text_muted),
            ));
        }

        Line::from(spans)
    }
}
