//! Theme system for consistent UI colors across dark and light modes.
//!
//! This module provides a centralized theme management system that automatically
//! detects the OS theme (dark/light mode) and applies appropriate colors.

use ratatui::style::Color;

use crate::config::ThemeMode;
use crate::models::HIGHLIGHT_PALETTE_SIZE;

/// Semantic color theme for the TUI.
///
/// Provides consistent colors across all UI components with support
/// for both dark and light terminal backgrounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color for confirmations and completed steps
    pub success: Color,
    /// Error state color for errors
    pub error: Color,
    /// Warning state color for warnings and the listening indicator
    pub warning: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Secondary text color for labels and less important content
    pub text_secondary: Color,
    /// Muted text color for help text, disabled items, and dim content
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Highlight/selection background color
    pub highlight_bg: Color,

    // State indicators
    /// Active/focused element color
    pub active: Color,
    /// Inactive/disabled element color
    pub inactive: Color,

    /// Colors for recognized keywords in the "Heard:" echo
    pub keyword_palette: [Color; HIGHLIGHT_PALETTE_SIZE],
}

impl Theme {
    /// Detects the OS theme and returns the appropriate Theme.
    ///
    /// This uses the `dark-light` crate to detect whether the OS is in
    /// dark or light mode, and returns the matching theme.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Resolves the configured theme mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Creates a dark theme optimized for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::DarkGray,

            active: Color::Yellow,
            inactive: Color::Gray,

            keyword_palette: [
                Color::Rgb(255, 99, 71),
                Color::Rgb(255, 165, 0),
                Color::Rgb(255, 215, 0),
                Color::Rgb(154, 205, 50),
                Color::Rgb(0, 206, 209),
                Color::Rgb(100, 149, 237),
                Color::Rgb(186, 85, 211),
                Color::Rgb(255, 105, 180),
                Color::Rgb(64, 224, 208),
                Color::Rgb(240, 128, 128),
            ],
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    ///
    /// # Color Choices
    /// - Uses darker colors for text and UI elements
    /// - Keyword colors are darkened so they stay readable on white
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0), // Dark orange for visibility
            success: Color::Rgb(0, 128, 0),  // Dark green
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),

            active: Color::Rgb(180, 100, 0),
            inactive: Color::Rgb(180, 180, 180),

            keyword_palette: [
                Color::Rgb(178, 34, 34),
                Color::Rgb(205, 102, 0),
                Color::Rgb(139, 117, 0),
                Color::Rgb(85, 107, 47),
                Color::Rgb(0, 128, 128),
                Color::Rgb(25, 25, 112),
                Color::Rgb(128, 0, 128),
                Color::Rgb(199, 21, 133),
                Color::Rgb(0, 100, 0),
                Color::Rgb(139, 69, 19),
            ],
        }
    }

    /// Color for a keyword highlight slot.
    #[must_use]
    pub const fn keyword_color(&self, slot: usize) -> Color {
        self.keyword_palette[slot % HIGHLIGHT_PALETTE_SIZE]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
