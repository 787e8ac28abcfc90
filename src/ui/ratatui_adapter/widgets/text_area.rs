//! Multi-line text editing buffer and widget
//!
//! Used by the snippet editor for its four fields. Each buffer keeps its own
//! cursor and scroll position, so switching focus never loses place.
//! Cursor columns are character indices, not bytes.

use crate::ui::ratatui_adapter::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// Editable text with a cursor and a scrolled viewport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAreaState {
    lines: Vec<String>,
    /// Cursor line
    row: usize,
    /// Cursor column (character index within the line)
    col: usize,
    row_offset: usize,
    col_offset: usize,
    width: usize,
    height: usize,
    /// Enter is ignored and the field never grows past one line
    single_line: bool,
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}

impl TextAreaState {
    /// Create a buffer holding `text`, cursor at the start
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(String::from).collect(),
            row: 0,
            col: 0,
            row_offset: 0,
            col_offset: 0,
            width: 1,
            height: 1,
            single_line: false,
        }
    }

    /// Restrict the buffer to a single line
    #[must_use]
    pub fn single_line(mut self) -> Self {
        self.single_line = true;
        self
    }

    /// Full contents, lines joined with `\n`
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as (line, column)
    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// First visible (line, column)
    #[must_use]
    pub const fn scroll(&self) -> (usize, usize) {
        (self.row_offset, self.col_offset)
    }

    #[must_use]
    pub const fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Set the visible area; contents and cursor are untouched
    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.adjust_scroll();
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| l.chars().count())
    }

    fn current_line(&mut self) -> &mut String {
        &mut self.lines[self.row]
    }

    fn adjust_scroll(&mut self) {
        if self.row < self.row_offset {
            self.row_offset = self.row;
        } else if self.row >= self.row_offset + self.height {
            self.row_offset = self.row + 1 - self.height;
        }
        if self.col < self.col_offset {
            self.col_offset = self.col;
        } else if self.col >= self.col_offset + self.width {
            self.col_offset = self.col + 1 - self.width;
        }
    }

    /// Insert a character at the cursor
    pub fn insert_char(&mut self, c: char) {
        let col = self.col;
        let line = self.current_line();
        let idx = byte_index(line, col);
        line.insert(idx, c);
        self.col += 1;
        self.adjust_scroll();
    }

    /// Split the current line at the cursor
    pub fn insert_newline(&mut self) {
        if self.single_line {
            return;
        }
        let col = self.col;
        let line = self.current_line();
        let idx = byte_index(line, col);
        let rest = line.split_off(idx);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
        self.adjust_scroll();
    }

    /// Delete the character before the cursor, joining lines at column 0
    pub fn backspace(&mut self) {
        if self.col > 0 {
            let col = self.col;
            let line = self.current_line();
            let start = byte_index(line, col - 1);
            line.remove(start);
            self.col -= 1;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.current_line().push_str(&line);
        }
        self.adjust_scroll();
    }

    /// Delete the character under the cursor, joining the next line at the end
    pub fn delete(&mut self) {
        let len = self.line_len(self.row);
        if self.col < len {
            let col = self.col;
            let line = self.current_line();
            let idx = byte_index(line, col);
            line.remove(idx);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.current_line().push_str(&next);
        }
    }

    /// Delete the word before the cursor (Ctrl+W)
    pub fn delete_word_backwards(&mut self) {
        let col = self.col;
        let line = self.current_line();
        let end = byte_index(line, col);
        let before = &line[..end];
        let trimmed = before.trim_end();
        let start = trimmed
            .rfind(char::is_whitespace)
            .map_or(0, |space| space + 1);
        line.drain(start..end);
        let new_col = line[..start].chars().count();
        self.col = new_col;
        self.adjust_scroll();
    }

    pub fn cursor_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
        self.adjust_scroll();
    }

    pub fn cursor_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
        self.adjust_scroll();
    }

    pub fn cursor_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
            self.adjust_scroll();
        }
    }

    pub fn cursor_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
            self.adjust_scroll();
        }
    }

    pub fn cursor_home(&mut self) {
        self.col = 0;
        self.adjust_scroll();
    }

    pub fn cursor_end(&mut self) {
        self.col = self.line_len(self.row);
        self.adjust_scroll();
    }

    /// Apply an editing key; returns `false` when the key is not an editing key
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => self.delete_word_backwards(),
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => self.cursor_home(),
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => self.cursor_end(),
            (KeyCode::Char(c), m) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.insert_char(c);
            }
            (KeyCode::Enter, _) => self.insert_newline(),
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Delete, _) => self.delete(),
            (KeyCode::Left, _) => self.cursor_left(),
            (KeyCode::Right, _) => self.cursor_right(),
            (KeyCode::Up, _) => self.cursor_up(),
            (KeyCode::Down, _) => self.cursor_down(),
            (KeyCode::Home, _) => self.cursor_home(),
            (KeyCode::End, _) => self.cursor_end(),
            _ => return false,
        }
        true
    }
}

/// Renders the visible window of a [`TextAreaState`]
pub struct TextArea<'a> {
    state: &'a TextAreaState,
    theme: &'a Theme,
    focused: bool,
    block: Option<Block<'a>>,
}

impl<'a> TextArea<'a> {
    #[must_use]
    pub const fn new(state: &'a TextAreaState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            focused: false,
            block: None,
        }
    }

    /// Show the cursor cell
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn render_line(&self, row: usize, line: &'a str, width: usize) -> Line<'a> {
        let (_, col_offset) = self.state.scroll();
        let visible: String = line.chars().skip(col_offset).take(width).collect();

        let (cursor_row, cursor_col) = self.state.cursor();
        if !self.focused || row != cursor_row {
            return Line::from(visible);
        }

        let at = cursor_col.saturating_sub(col_offset);
        let before: String = visible.chars().take(at).collect();
        let under: String = visible.chars().nth(at).map_or_else(|| " ".to_string(), String::from);
        let after: String = visible.chars().skip(at + 1).collect();
        Line::from(vec![
            Span::raw(before),
            Span::styled(under, self.theme.text_cursor_style()),
            Span::raw(after),
        ])
    }
}

impl Widget for TextArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let (row_offset, _) = self.state.scroll();
        let lines: Vec<Line> = self
            .state
            .lines()
            .iter()
            .enumerate()
            .skip(row_offset)
            .take(inner.height as usize)
            .map(|(row, line)| self.render_line(row, line, inner.width as usize))
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
