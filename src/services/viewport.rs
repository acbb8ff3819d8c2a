//! Layout decision from the viewport width.

/// How the tools of a map are arranged on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// One tool at a time, picked with tabs
    Narrow,
    /// All tools side by side
    Wide,
}

impl LayoutMode {
    /// Picks the layout for a viewport width.
    #[must_use]
    pub const fn for_width(width: u16, wide_min_width: u16) -> Self {
        if width >= wide_min_width {
            Self::Wide
        } else {
            Self::Narrow
        }
    }

    /// Whether all tools are shown at once.
    #[must_use]
    pub const fn is_wide(self) -> bool {
        matches!(self, Self::Wide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_width() {
        assert_eq!(LayoutMode::for_width(80, 120), LayoutMode::Narrow);
        assert_eq!(LayoutMode::for_width(120, 120), LayoutMode::Wide);
        assert!(LayoutMode::for_width(200, 120).is_wide());
    }
}
