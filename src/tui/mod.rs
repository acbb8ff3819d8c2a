//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod bomb_order;
pub mod checklist;
pub mod component;
pub mod handlers;
pub mod help_overlay;
pub mod status_bar;
pub mod theme;
pub mod valve_tracker;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::{EasterEggMap, ToolKind};
use crate::services::LayoutMode;
use crate::shortcuts::contexts;
use crate::speech::Recognizer;

// Re-export TUI components
pub use bomb_order::BombOrderPanel;
pub use checklist::ChecklistPanel;
pub use component::{Component, ComponentEvent, ContextualComponent, PanelEvent};
pub use help_overlay::HelpOverlay;
pub use status_bar::StatusBar;
pub use theme::Theme;
pub use valve_tracker::ValveTrackerPanel;

/// A panel that can take focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    /// One of the map's tools
    Tool(ToolKind),
    /// The progress checklist
    Checklist,
}

impl PanelKind {
    /// Shortcut context of the panel.
    #[must_use]
    pub const fn context(self) -> &'static str {
        match self {
            Self::Tool(ToolKind::Bomb) => contexts::BOMB,
            Self::Tool(ToolKind::Valve) => contexts::VALVE,
            Self::Tool(ToolKind::ComingSoon) => contexts::MAIN,
            Self::Checklist => contexts::CHECKLIST,
        }
    }

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tool(tool) => tool.label(),
            Self::Checklist => "Checklist",
        }
    }
}

/// Tool state for the map on screen.
///
/// Rebuilt whenever another map is selected, so nothing carries over.
#[derive(Default)]
pub struct MapSession {
    /// Bomb order picker
    pub bomb: BombOrderPanel,
    /// Valve tracker
    pub valves: ValveTrackerPanel,
    /// Progress checklist
    pub checklist: ChecklistPanel,
}

impl MapSession {
    /// Fresh state for a map.
    #[must_use]
    pub fn new(voice_available: bool) -> Self {
        Self {
            bomb: BombOrderPanel::new(voice_available),
            valves: ValveTrackerPanel::new(),
            checklist: ChecklistPanel::new(),
        }
    }
}

/// Application state - single source of truth.
///
/// All UI components read from this state.
/// Only event handlers modify this state.
pub struct AppState {
    /// All maps
    pub catalog: Catalog,
    /// Loaded configuration
    pub config: Config,
    /// Current theme
    pub theme: Theme,
    /// Index of the map on screen
    pub map_index: usize,
    /// Tool state of the map on screen
    pub session: MapSession,
    /// Index of the focused panel in [`AppState::panels`]
    pub focus: usize,
    /// Whether the checklist panel is shown
    pub checklist_visible: bool,
    /// Current layout decision
    pub layout_mode: LayoutMode,
    /// Help overlay, when open
    pub help: Option<HelpOverlay>,
    /// Status bar message
    pub status_message: String,
    /// Error shown in the error overlay
    pub error_message: Option<String>,
    /// Speech recognizer, if voice input is available
    recognizer: Option<Box<dyn Recognizer>>,
    /// Exit the event loop
    pub should_quit: bool,
}

impl AppState {
    /// Creates the application state.
    ///
    /// Starts on `start_map` when given, otherwise on the configured default
    /// map, falling back to the first map of the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if `start_map` is not in the catalog.
    pub fn new(
        catalog: Catalog,
        config: Config,
        recognizer: Option<Box<dyn Recognizer>>,
        start_map: Option<&str>,
    ) -> Result<Self> {
        let map_index = match start_map {
            Some(id) => catalog
                .position(id)
                .with_context(|| format!("Unknown map '{id}'"))?,
            None => catalog.position(&config.ui.default_map).unwrap_or_else(|| {
                warn!(
                    "Default map '{}' not in catalog, using the first map",
                    config.ui.default_map
                );
                0
            }),
        };

        let voice_available = recognizer.is_some();
        let theme = Theme::from_mode(config.ui.theme_mode);

        let mut state = Self {
            catalog,
            config,
            theme,
            map_index,
            session: MapSession::new(voice_available),
            focus: 0,
            checklist_visible: false,
            layout_mode: LayoutMode::Narrow,
            help: None,
            status_message: String::new(),
            error_message: None,
            recognizer,
            should_quit: false,
        };
        state.sync_focus();
        Ok(state)
    }

    /// Map on screen.
    #[must_use]
    pub fn current_map(&self) -> &EasterEggMap {
        &self.catalog.maps()[self.map_index]
    }

    /// Whether voice input can be offered.
    #[must_use]
    pub fn voice_available(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Panels of the current map in focus order.
    #[must_use]
    pub fn panels(&self) -> Vec<PanelKind> {
        let map = self.current_map();
        let mut panels: Vec<PanelKind> = map.tools.iter().copied().map(PanelKind::Tool).collect();
        if self.checklist_visible && !map.checklist.is_empty() {
            panels.push(PanelKind::Checklist);
        }
        panels
    }

    /// Focused panel.
    #[must_use]
    pub fn focused_panel(&self) -> Option<PanelKind> {
        self.panels().get(self.focus).copied()
    }

    /// Shortcut context of the focused panel.
    #[must_use]
    pub fn focused_context(&self) -> &'static str {
        if self.help.is_some() {
            return contexts::HELP;
        }
        self.focused_panel()
            .map_or(contexts::MAIN, PanelKind::context)
    }

    /// Sets the status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Clears the status message so panel hints show instead.
    pub fn clear_status(&mut self) {
        self.status_message.clear();
    }

    /// Shows the error overlay.
    pub fn set_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        warn!("{error}");
        self.error_message = Some(error);
    }

    /// Dismisses the error overlay.
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Switches to another map, discarding all tool state.
    pub fn select_map(&mut self, index: usize) {
        if index >= self.catalog.maps().len() || index == self.map_index {
            return;
        }
        self.map_index = index;
        self.session = MapSession::new(self.voice_available());
        self.focus = 0;
        self.sync_focus();

        let name = self.current_map().name.clone();
        info!("Switched to map {name}");
        self.set_status(format!("Map: {name}"));
    }

    /// Cycles through the maps.
    pub fn cycle_map(&mut self, forward: bool) {
        let count = self.catalog.maps().len();
        let next = if forward {
            (self.map_index + 1) % count
        } else {
            (self.map_index + count - 1) % count
        };
        self.select_map(next);
    }

    /// Cycles the focused panel.
    pub fn cycle_focus(&mut self, forward: bool) {
        let count = self.panels().len();
        if count == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
        self.sync_focus();
    }

    /// Shows or hides the checklist panel.
    pub fn toggle_checklist(&mut self) {
        if !self.config.ui.show_checklist {
            self.set_status("Checklist is disabled in the configuration");
            return;
        }
        if self.current_map().checklist.is_empty() {
            self.set_status("This map has no checklist");
            return;
        }

        self.checklist_visible = !self.checklist_visible;
        if self.checklist_visible {
            // focus the checklist right away
            self.focus = self.panels().len() - 1;
            self.set_status("Checklist shown");
        } else {
            self.focus = self.focus.min(self.panels().len().saturating_sub(1));
            self.set_status("Checklist hidden");
        }
        self.sync_focus();
    }

    /// Opens the help overlay.
    pub fn open_help(&mut self) {
        let help = HelpOverlay::new(self.current_map(), self.voice_available());
        self.help = Some(help);
    }

    /// Starts listening for the bomb order.
    pub fn start_listening(&mut self) {
        let Some(recognizer) = self.recognizer.as_deref() else {
            self.set_status("Voice input unavailable");
            return;
        };

        match self.session.bomb.start_listening(recognizer) {
            Ok(()) => self.set_status("Listening..."),
            Err(e) => self.set_error(format!("Voice input failed: {e:#}")),
        }
    }

    /// Drains speech outcomes.
    pub fn poll_voice(&mut self) {
        let map = &self.catalog.maps()[self.map_index];
        if let Some(event) = self.session.bomb.poll_voice(map) {
            self.handle_panel_event(event);
        }
    }

    /// Applies an event emitted by a panel.
    pub fn handle_panel_event(&mut self, event: PanelEvent) {
        match event {
            PanelEvent::Status(message) => self.set_status(message),
            PanelEvent::StartListening => self.start_listening(),
        }
    }

    /// Recomputes the layout for a terminal width.
    pub fn update_layout(&mut self, width: u16) {
        let mode = LayoutMode::for_width(width, self.config.ui.wide_layout_min_width);
        if mode != self.layout_mode {
            debug!("Layout changed to {mode:?} at width {width}");
            self.layout_mode = mode;
        }
    }

    fn sync_focus(&mut self) {
        let focused = self.focused_panel();
        self.session
            .bomb
            .set_focused(focused == Some(PanelKind::Tool(ToolKind::Bomb)));
        self.session
            .valves
            .set_focused(focused == Some(PanelKind::Tool(ToolKind::Valve)));
        self.session
            .checklist
            .set_focused(focused == Some(PanelKind::Checklist));
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let size = terminal.size().context("Failed to read terminal size")?;
    state.update_layout(size.width);

    loop {
        // Apply theme based on user preference (Auto detects OS, Dark/Light are explicit)
        state.theme = Theme::from_mode(state.config.ui.theme_mode);

        // Render current state
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                Event::Resize(width, _) => state.update_layout(width),
                _ => {}
            }
        }

        // Poll speech recognition for results
        state.poll_voice();

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Tools
            Constraint::Length(6), // Status bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    render_main_content(f, chunks[1], state);
    StatusBar::render(f, chunks[2], state, &state.theme);

    if let Some(help) = &state.help {
        help.render(f, f.area(), &state.theme);
    }

    // Render error overlay on top of everything if error is present
    if let Some(ref error) = state.error_message {
        render_error_overlay(f, error, &state.theme);
    }
}

/// Render title bar with the map tabs
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let titles: Vec<Line> = state
        .catalog
        .maps()
        .iter()
        .map(|map| Line::from(map.name.clone()))
        .collect();

    let tabs = Tabs::new(titles)
        .select(state.map_index)
        .style(Style::default().fg(theme.text_secondary).bg(theme.background))
        .highlight_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled("│", Style::default().fg(theme.text_muted)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {APP_NAME} "))
                .border_style(Style::default().fg(theme.primary))
                .style(Style::default().bg(theme.background)),
        );

    f.render_widget(tabs, area);
}

/// Render the tool panels for the current layout mode
fn render_main_content(f: &mut Frame, area: Rect, state: &AppState) {
    let panels = state.panels();
    if panels.is_empty() {
        return;
    }

    if state.layout_mode.is_wide() {
        let constraints = vec![Constraint::Ratio(1, panels.len() as u32); panels.len()];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (panel, column) in panels.iter().zip(columns.iter()) {
            render_panel(f, *column, state, *panel);
        }
        return;
    }

    // Narrow: one panel at a time behind a tab row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let theme = &state.theme;
    let tabs = Tabs::new(panels.iter().map(|p| p.label()).collect::<Vec<_>>())
        .select(state.focus)
        .style(Style::default().fg(theme.text_secondary))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    if let Some(panel) = state.focused_panel() {
        render_panel(f, chunks[1], state, panel);
    }
}

fn render_panel(f: &mut Frame, area: Rect, state: &AppState, panel: PanelKind) {
    let map = state.current_map();
    let theme = &state.theme;

    match panel {
        PanelKind::Tool(ToolKind::Bomb) => state.session.bomb.render(f, area, theme, map),
        PanelKind::Tool(ToolKind::Valve) => state.session.valves.render(f, area, theme, map),
        PanelKind::Tool(ToolKind::ComingSoon) => render_coming_soon(f, area, theme),
        PanelKind::Checklist => state.session.checklist.render(f, area, theme, map),
    }
}

fn render_coming_soon(f: &mut Frame, area: Rect, theme: &Theme) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "More maps coming soon",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.inactive)),
    );
    f.render_widget(text, area);
}

/// Render error overlay on top of all other UI elements
fn render_error_overlay(f: &mut Frame, error: &str, theme: &Theme) {
    let area = centered_rect(70, 40, f.area());

    f.render_widget(Clear, area);
    let background = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(background, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Error message
            Constraint::Length(3), // Help text
        ])
        .split(area);

    let title = Paragraph::new("ERROR")
        .style(
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(theme.error).bg(theme.background)),
        );
    f.render_widget(title, chunks[0]);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(theme.text))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Details ")
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(error_text, chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled(
            "Enter/Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Dismiss"),
    ]))
    .style(Style::default().fg(theme.text).bg(theme.background))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.background)),
    );
    f.render_widget(help, chunks[2]);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Handle keyboard input events
fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::{KeyCode, KeyEventKind};

    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }

    // If error overlay is shown, allow dismissing with Enter or Esc
    if state.error_message.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            state.clear_error();
        }
        // Block all other input while error is shown
        return Ok(false);
    }

    if state.help.is_some() {
        return handlers::handle_help_input(state, key);
    }

    handlers::handle_main_input(state, key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::SpeechOutcome;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::mpsc::Sender;
    use std::sync::{Arc, Mutex};

    /// Recognizer that hands its sender to the test.
    #[derive(Clone, Default)]
    struct ManualRecognizer {
        sender: Arc<Mutex<Option<Sender<SpeechOutcome>>>>,
    }

    impl Recognizer for ManualRecognizer {
        fn start(&self, outcomes: Sender<SpeechOutcome>) -> Result<()> {
            *self.sender.lock().unwrap() = Some(outcomes);
            Ok(())
        }

        fn describe(&self) -> String {
            "manual".to_string()
        }
    }

    fn state() -> AppState {
        AppState::new(Catalog::load().unwrap(), Config::default(), None, None).unwrap()
    }

    fn press(state: &mut AppState, code: KeyCode) -> bool {
        handle_key_event(state, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_starts_on_default_map() {
        let state = state();
        assert_eq!(state.current_map().id, "gorod-krovi");
        assert!(!state.checklist_visible);
        assert_eq!(
            state.panels(),
            vec![
                PanelKind::Tool(ToolKind::Bomb),
                PanelKind::Tool(ToolKind::Valve)
            ]
        );
    }

    #[test]
    fn test_unknown_start_map_fails() {
        let result = AppState::new(
            Catalog::load().unwrap(),
            Config::default(),
            None,
            Some("nowhere"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_map_switch_discards_tool_state() {
        let mut state = state();
        press(&mut state, KeyCode::Enter);
        assert_eq!(state.session.bomb.selection().len(), 1);

        press(&mut state, KeyCode::Char(']'));
        assert_eq!(state.current_map().id, "more-coming-soon");
        press(&mut state, KeyCode::Char('['));
        assert_eq!(state.current_map().id, "gorod-krovi");
        assert!(state.session.bomb.selection().is_empty());
    }

    #[test]
    fn test_checklist_toggle_and_focus() {
        let mut state = state();
        press(&mut state, KeyCode::Char('c'));
        assert!(state.checklist_visible);
        assert_eq!(state.focused_panel(), Some(PanelKind::Checklist));

        press(&mut state, KeyCode::Tab);
        assert_eq!(state.focused_panel(), Some(PanelKind::Tool(ToolKind::Bomb)));

        press(&mut state, KeyCode::Char('c'));
        assert!(!state.checklist_visible);
    }

    #[test]
    fn test_checklist_disabled_by_config() {
        let mut config = Config::default();
        config.ui.show_checklist = false;
        let mut state = AppState::new(Catalog::load().unwrap(), config, None, None).unwrap();

        press(&mut state, KeyCode::Char('c'));
        assert!(!state.checklist_visible);
    }

    #[test]
    fn test_help_overlay_opens_and_closes() {
        let mut state = state();
        press(&mut state, KeyCode::Char('?'));
        assert!(state.help.is_some());
        assert_eq!(state.focused_context(), contexts::HELP);
        press(&mut state, KeyCode::Esc);
        assert!(state.help.is_none());
    }

    #[test]
    fn test_quit() {
        let mut state = state();
        assert!(press(&mut state, KeyCode::Char('q')));
    }

    #[test]
    fn test_voice_transcript_updates_selection() {
        let recognizer = ManualRecognizer::default();
        let mut state = AppState::new(
            Catalog::load().unwrap(),
            Config::default(),
            Some(Box::new(recognizer.clone())),
            None,
        )
        .unwrap();

        press(&mut state, KeyCode::Char('v'));
        assert!(state.session.bomb.is_listening());

        press(&mut state, KeyCode::Char('v'));
        assert_eq!(state.status_message, "Already listening");

        let sender = recognizer.sender.lock().unwrap().take().unwrap();
        sender
            .send(SpeechOutcome::Transcript("tank, beds".to_string()))
            .unwrap();
        state.poll_voice();

        assert!(!state.session.bomb.is_listening());
        assert_eq!(state.session.bomb.selection().len(), 2);
        assert_eq!(state.status_message, "Heard 2 stations");
    }

    #[test]
    fn test_layout_mode_follows_width() {
        let mut state = state();
        state.update_layout(80);
        assert_eq!(state.layout_mode, LayoutMode::Narrow);
        state.update_layout(160);
        assert_eq!(state.layout_mode, LayoutMode::Wide);
    }
}
