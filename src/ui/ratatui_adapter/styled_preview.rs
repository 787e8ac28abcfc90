//! Highlighted code previews for the detail pane
//!
//! Converts syntect highlighting directly to ratatui styles without
//! intermediate ANSI escape codes. Highlighting never fails: any problem
//! falls back to the unstyled text.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

#[cfg(feature = "syntax-highlighting")]
use syntect::easy::HighlightLines;
#[cfg(feature = "syntax-highlighting")]
use syntect::highlighting::{FontStyle, Theme as SyntectTheme, ThemeSet};
#[cfg(feature = "syntax-highlighting")]
use syntect::parsing::SyntaxSet;
#[cfg(feature = "syntax-highlighting")]
use syntect::util::LinesWithEndings;

/// Theme used when the configured one does not exist
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Marker appended when a preview is cut short
pub const TRUNCATION_MARKER: &str = "... (truncated)";

const TAB_WIDTH: usize = 4;

/// Turns code into styled lines
pub trait Highlighter {
    /// Highlight `code` for `language`. Must not fail: on any internal error
    /// the text comes back unstyled.
    fn highlight(&self, code: &str, language: &str) -> Vec<Line<'static>>;
}

/// Map the language names people actually type onto syntax tokens
#[must_use]
pub fn normalize_language(language: &str) -> String {
    let lang = language.trim().to_lowercase();
    let canonical = match lang.as_str() {
        "ps" | "pwsh" | "powershell" | "ps1" => "powershell",
        "js" | "node" | "nodejs" => "javascript",
        "ts" => "typescript",
        "sh" | "shell" | "zsh" | "bash" => "bash",
        "py" => "python",
        "c#" => "csharp",
        "c++" => "cpp",
        "md" => "markdown",
        "yml" => "yaml",
        "tf" | "terraform" => "hcl",
        other => other,
    };
    canonical.to_string()
}

/// Highlighter that applies no styling
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _language: &str) -> Vec<Line<'static>> {
        code.lines().map(|line| Line::raw(line.to_string())).collect()
    }
}

/// Syntect-backed highlighter
#[cfg(feature = "syntax-highlighting")]
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: SyntectTheme,
}

#[cfg(feature = "syntax-highlighting")]
impl SyntectHighlighter {
    /// Load the bundled syntaxes and the named theme, falling back to
    /// [`DEFAULT_THEME`] when the name is unknown
    #[must_use]
    pub fn new(theme_name: &str) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = match themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!(theme = theme_name, "unknown highlight theme, using default");
                themes.remove(DEFAULT_THEME).unwrap_or_default()
            }
        };
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    fn try_highlight(&self, code: &str, language: &str) -> Option<Vec<Line<'static>>> {
        let token = normalize_language(language);
        let syntax = self
            .syntax_set
            .find_syntax_by_token(&token)
            .or_else(|| self.syntax_set.find_syntax_by_first_line(code))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter.highlight_line(line, &self.syntax_set).ok()?;
            let spans: Vec<Span<'static>> = ranges
                .iter()
                .filter_map(|(style, text)| {
                    let text = text.trim_end_matches(['\n', '\r']);
                    (!text.is_empty())
                        .then(|| Span::styled(text.to_string(), syntect_to_ratatui(style)))
                })
                .collect();
            lines.push(Line::from(spans));
        }
        Some(lines)
    }
}

#[cfg(feature = "syntax-highlighting")]
impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Vec<Line<'static>> {
        self.try_highlight(code, language).unwrap_or_else(|| {
            tracing::debug!(language, "highlighting failed, showing plain text");
            PlainHighlighter.highlight(code, language)
        })
    }
}

/// Convert syntect style to ratatui style
#[cfg(feature = "syntax-highlighting")]
fn syntect_to_ratatui(style: &syntect::highlighting::Style) -> Style {
    let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);
    let mut ratatui_style = Style::default().fg(fg);

    if style.font_style.contains(FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }

    ratatui_style
}

/// The best highlighter this build supports
#[must_use]
pub fn default_highlighter(theme_name: &str) -> Box<dyn Highlighter> {
    #[cfg(feature = "syntax-highlighting")]
    {
        Box::new(SyntectHighlighter::new(theme_name))
    }
    #[cfg(not(feature = "syntax-highlighting"))]
    {
        let _ = theme_name;
        Box::new(PlainHighlighter)
    }
}

/// Code preview ready for the detail pane
#[derive(Debug, Clone, PartialEq)]
pub struct CodePreview {
    /// Styled lines, already cut to the pane width
    pub lines: Vec<Line<'static>>,
    /// Whether lines were dropped
    pub truncated: bool,
    /// Line count of the full snippet
    pub total_lines: usize,
}

impl CodePreview {
    /// Highlight at most `max_lines` lines of `code` and cut each to `width` columns
    #[must_use]
    pub fn build(
        highlighter: &dyn Highlighter,
        code: &str,
        language: &str,
        max_lines: usize,
        width: usize,
    ) -> Self {
        let expanded = code.replace('\t', &" ".repeat(TAB_WIDTH));
        let all: Vec<&str> = expanded.lines().collect();
        let total_lines = all.len();
        let truncated = total_lines > max_lines;
        let shown = all[..total_lines.min(max_lines)].join("\n");

        let mut lines: Vec<Line<'static>> = highlighter
            .highlight(&shown, language)
            .into_iter()
            .map(|line| hard_cut(line, width))
            .collect();

        if truncated {
            lines.push(Line::styled(
                TRUNCATION_MARKER,
                Style::default().fg(Color::DarkGray),
            ));
        }

        Self {
            lines,
            truncated,
            total_lines,
        }
    }
}

/// Cut a line to at most `width` display columns; never wraps
#[must_use]
pub fn hard_cut(line: Line<'static>, width: usize) -> Line<'static> {
    let mut remaining = width;
    let mut spans = Vec::with_capacity(line.spans.len());

    for span in line.spans {
        if remaining == 0 {
            break;
        }
        let mut cut = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if w > remaining {
                remaining = 0;
                break;
            }
            remaining -= w;
            cut.push(c);
        }
        spans.push(Span::styled(cut, span.style));
    }

    Line::from(spans).style(line.style)
}
