//! Frame rendering for the snippet browser
//!
//! Rendering is a read-only projection of the session: it takes shared
//! references only and draws the same frame for the same state.

use crate::filter::tokens;
use crate::model::Snippet;
use crate::ui::ratatui_adapter::layout::{EditGeometry, FOOTER_HEIGHT, Geometry, HEADER_HEIGHT};
use crate::ui::ratatui_adapter::session::SessionSettings;
use crate::ui::ratatui_adapter::state::{Browser, EditField, Editor, SessionState};
use crate::ui::ratatui_adapter::styled_preview::CodePreview;
use crate::ui::ratatui_adapter::theme::Theme;
use crate::ui::ratatui_adapter::widgets::{
    BROWSE_HINTS, EDIT_HINTS, HelpBar, ItemList, TextArea, hint_line,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Everything a frame is drawn from
pub struct View<'a> {
    pub state: &'a SessionState,
    pub notice: Option<&'a str>,
    /// Highlighted code of the selected snippet
    pub preview: Option<&'a CodePreview>,
    /// Geometry from the last resize; computed from the frame when unknown
    pub geometry: Option<&'a Geometry>,
    pub edit_geometry: Option<&'a EditGeometry>,
    pub settings: SessionSettings,
}

/// Draw the whole screen
pub fn draw(frame: &mut Frame, view: &View<'_>, theme: &Theme) {
    let area = frame.area();
    match view.state {
        SessionState::Browsing(browser) => draw_browser(frame, area, view, browser, None, theme),
        SessionState::ConfirmingDelete { browser, pending } => {
            draw_browser(frame, area, view, browser, Some(pending.message.as_str()), theme);
        }
        SessionState::Editing(editor) => {
            let geometry = view
                .edit_geometry
                .copied()
                .unwrap_or_else(|| EditGeometry::compute(area.width, area.height));
            draw_editor(frame, area, &geometry, editor, theme);
        }
    }
}

fn draw_browser(
    frame: &mut Frame,
    area: Rect,
    view: &View<'_>,
    browser: &Browser,
    confirm: Option<&str>,
    theme: &Theme,
) {
    let geometry = view.geometry.copied().unwrap_or_else(|| {
        Geometry::compute(area.width, area.height, view.settings.list_width_percent)
    });
    let [list_area, detail_area] = Layout::horizontal([
        Constraint::Length(geometry.list_width),
        Constraint::Length(geometry.detail_width),
    ])
    .areas(area);

    frame.render_widget(
        ItemList::new(browser.entries(), browser.view(), browser.list(), theme),
        list_area,
    );

    let [header_area, preview_area, footer_area] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(detail_area);

    let marks = tokens(browser.query());
    let selected = browser.selected();

    match selected {
        Some(snippet) => draw_header(frame, header_area, snippet, &marks, theme),
        None => frame.render_widget(
            Paragraph::new(Line::styled("No matching snippets", theme.dimmed_style())),
            header_area,
        ),
    }

    if selected.is_some()
        && let Some(preview) = view.preview
    {
        draw_preview(frame, preview_area, preview);
    }

    draw_footer(frame, footer_area, browser, selected, &marks, confirm, view.notice, theme);
}

fn rule(width: u16, theme: &Theme) -> Paragraph<'static> {
    Paragraph::new(Line::styled("─".repeat(width as usize), theme.border_style()))
}

fn draw_header(frame: &mut Frame, area: Rect, snippet: &Snippet, marks: &[String], theme: &Theme) {
    let [top, title, description, bottom] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(HEADER_HEIGHT - 3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(rule(area.width, theme), top);
    frame.render_widget(
        Paragraph::new(Line::from(mark_tokens(
            &snippet.title,
            marks,
            theme.heading_style(),
            theme.match_style(),
        ))),
        title,
    );
    frame.render_widget(
        Paragraph::new(Line::from(mark_tokens(
            &snippet.description,
            marks,
            theme.dimmed_style(),
            theme.match_style(),
        )))
        .wrap(Wrap { trim: true }),
        description,
    );
    frame.render_widget(rule(area.width, theme), bottom);
}

/// Code preview, centred vertically in the free space and indented one column
fn draw_preview(frame: &mut Frame, area: Rect, preview: &CodePreview) {
    let height = u16::try_from(preview.lines.len()).unwrap_or(u16::MAX);
    let shown = height.min(area.height);
    let top = (area.height - shown) / 2;
    let target = Rect {
        x: area.x.saturating_add(1),
        y: area.y + top,
        width: area.width.saturating_sub(2),
        height: shown,
    };
    frame.render_widget(Paragraph::new(preview.lines.clone()), target);
}

#[allow(clippy::too_many_arguments)]
fn draw_footer(
    frame: &mut Frame,
    area: Rect,
    browser: &Browser,
    selected: Option<&Snippet>,
    marks: &[String],
    confirm: Option<&str>,
    notice: Option<&str>,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [meta_area, prompt_area, query_area, notice_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    if let Some(snippet) = selected {
        let label = |text: &'static str| Span::styled(text, theme.label_style());
        let mut keywords = vec![label("Keywords: ")];
        keywords.extend(mark_tokens(
            &snippet.keywords,
            marks,
            Style::default(),
            theme.match_style(),
        ));

        let meta = vec![
            Line::from(vec![
                label("Language: "),
                Span::raw(snippet.language_label()),
                Span::raw("   "),
                label("Formatters: "),
                Span::raw(snippet.formatters_label().to_string()),
            ]),
            Line::from(keywords),
            Line::from(vec![
                label("Hit count: "),
                Span::raw(snippet.usage_count.to_string()),
                Span::raw("   "),
                label("Last used: "),
                Span::raw(snippet.last_used_label()),
            ]),
        ];
        frame.render_widget(Paragraph::new(meta), meta_area);
    }

    let prompt = match confirm {
        Some(message) => Paragraph::new(Line::styled(message.to_string(), theme.warning_style())),
        None => Paragraph::new(hint_line(BROWSE_HINTS, theme)),
    };
    frame.render_widget(prompt.wrap(Wrap { trim: true }), prompt_area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Query: ", theme.label_style()),
            Span::raw(format!("{:?}", browser.query())),
        ])),
        query_area,
    );

    if let Some(notice) = notice {
        frame.render_widget(
            Paragraph::new(Line::styled(notice.to_string(), theme.error_style())),
            notice_area,
        );
    }
}

fn draw_editor(
    frame: &mut Frame,
    area: Rect,
    geometry: &EditGeometry,
    editor: &Editor,
    theme: &Theme,
) {
    let area = Rect {
        x: area.x + geometry.margin().min(area.width),
        width: geometry.inner_width.min(area.width),
        ..area
    };

    let heights = geometry.field_heights();
    let mut constraints = Vec::with_capacity(12);
    for height in heights {
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(height + 2));
    }
    constraints.extend([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ]);
    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in EditField::ALL.into_iter().enumerate() {
        let focused = editor.focus() == field;
        let label_style = if focused {
            theme.label_style()
        } else {
            theme.dimmed_style()
        };
        frame.render_widget(
            Paragraph::new(Line::styled(field.label(), label_style)),
            rows[i * 2],
        );

        let border = if focused {
            theme.focus_border_style()
        } else {
            theme.border_style()
        };
        let block = Block::default().borders(Borders::ALL).border_style(border);
        frame.render_widget(
            TextArea::new(editor.field(field), theme)
                .focused(focused)
                .block(block),
            rows[i * 2 + 1],
        );
    }

    if let Some(status) = &editor.status {
        frame.render_widget(
            Paragraph::new(Line::styled(status.clone(), theme.error_style())),
            rows[9],
        );
    }
    frame.render_widget(HelpBar::new(EDIT_HINTS, theme), rows[11]);
}

/// Split `text` into spans, styling every occurrence of a token with `mark`
///
/// Matching is case-insensitive and works on characters, so multi-byte text
/// is never split inside a code point.
#[must_use]
pub fn mark_tokens(text: &str, tokens: &[String], base: Style, mark: Style) -> Vec<Span<'static>> {
    let chars: Vec<char> = text.chars().collect();

    // Lowercased text, remembering which original char each lowered char came from
    let mut lowered = Vec::with_capacity(chars.len());
    let mut origin = Vec::with_capacity(chars.len());
    for (i, c) in chars.iter().enumerate() {
        for lc in c.to_lowercase() {
            lowered.push(lc);
            origin.push(i);
        }
    }

    let mut marked = vec![false; chars.len()];
    for token in tokens {
        let needle: Vec<char> = token.chars().collect();
        if needle.is_empty() || needle.len() > lowered.len() {
            continue;
        }
        for start in 0..=lowered.len() - needle.len() {
            if lowered[start..start + needle.len()] == needle[..] {
                for &i in &origin[start..start + needle.len()] {
                    marked[i] = true;
                }
            }
        }
    }

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_marked = false;
    for (c, is_marked) in chars.into_iter().zip(marked) {
        if is_marked != current_marked && !current.is_empty() {
            let style = if current_marked { mark } else { base };
            spans.push(Span::styled(std::mem::take(&mut current), style));
        }
        current_marked = is_marked;
        current.push(c);
    }
    if !current.is_empty() {
        let style = if current_marked { mark } else { base };
        spans.push(Span::styled(current, style));
    }
    spans
}
