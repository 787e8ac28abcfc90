//! Color theme definitions for the ratatui TUI
//!
//! Defines colors and styles used throughout the application.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the selected snippet
    pub selection_bg: Color,
    /// Foreground color for the selected snippet
    pub selection_fg: Color,
    /// Color for query-token occurrences
    pub match_highlight: Color,
    /// Color for the cursor indicator
    pub cursor: Color,
    /// Color for error messages
    pub error: Color,
    /// Color for the delete confirmation prompt
    pub warning: Color,
    /// Color for borders
    pub border: Color,
    /// Border color of the focused editor field
    pub focus: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
    /// Color for footer labels
    pub label: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            match_highlight: Color::Yellow,
            cursor: Color::Cyan,
            error: Color::Red,
            warning: Color::Yellow,
            border: Color::DarkGray,
            focus: Color::Cyan,
            dimmed: Color::DarkGray,
            label: Color::Magenta,
        }
    }

    /// Style for the currently selected item
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for unselected items
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    /// Style for the cursor indicator (>)
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the text cursor cell inside an editor field
    #[must_use]
    pub fn text_cursor_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED)
    }

    /// Style for marked query tokens
    #[must_use]
    pub fn match_style(&self) -> Style {
        Style::default()
            .fg(self.match_highlight)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Style for the snippet title in the detail header
    #[must_use]
    pub fn heading_style(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    /// Style for error messages
    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for the confirmation prompt
    #[must_use]
    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for the border of the focused field
    #[must_use]
    pub fn focus_border_style(&self) -> Style {
        Style::default().fg(self.focus)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    /// Style for footer labels
    #[must_use]
    pub fn label_style(&self) -> Style {
        Style::default()
            .fg(self.label)
            .add_modifier(Modifier::BOLD)
    }
}
