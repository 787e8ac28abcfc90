//! Key legend widget

use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

/// A keybind hint to display in the legend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// Key combination (e.g., "Enter", "Ctrl+D")
    pub key: &'static str,
    /// Action description (e.g., "copy", "delete")
    pub action: &'static str,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Legend shown while browsing
pub const BROWSE_HINTS: &[KeyHint] = &[
    KeyHint::new("Enter", "copy"),
    KeyHint::new("↑/↓", "move"),
    KeyHint::new("Ctrl+E", "edit"),
    KeyHint::new("Ctrl+D", "delete"),
    KeyHint::new("Esc", "clear/quit"),
    KeyHint::new("Ctrl+C", "quit"),
];

/// Legend shown in the editor
pub const EDIT_HINTS: &[KeyHint] = &[
    KeyHint::new("Ctrl+S", "save"),
    KeyHint::new("Esc", "cancel"),
    KeyHint::new("Tab/Shift+Tab", "move between fields"),
];

/// Builds the legend as a single styled line
#[must_use]
pub fn hint_line<'a>(hints: &'a [KeyHint], theme: &Theme) -> Line<'a> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", theme.dimmed_style()));
        }
        spans.push(Span::styled(hint.key, theme.cursor_style()));
        spans.push(Span::styled(" ", theme.dimmed_style()));
        spans.push(Span::raw(hint.action));
    }

    Line::from(spans)
}

/// Help bar widget that displays keybind hints
pub struct HelpBar<'a> {
    /// Hints to display
    hints: &'a [KeyHint],
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(hint_line(self.hints, self.theme))
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
