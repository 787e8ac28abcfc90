//! Snippet list widget and its navigation state
//!
//! The session talks to the list only through [`ListNavigator`], so the
//! hand-rolled [`ItemListState`] could be swapped for another scroller
//! without touching the state machine.

use crate::model::Snippet;
use crate::ui::ratatui_adapter::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Widget},
};

/// Rows each snippet occupies in the list: title and description
pub const ITEM_HEIGHT: usize = 2;

/// Capability the session needs from a list widget
pub trait ListNavigator {
    /// Replace the item count, keeping the cursor in range
    fn set_items(&mut self, count: usize);

    /// Index of the selected item, `None` when the list is empty
    fn selected_index(&self) -> Option<usize>;

    /// Apply a navigation key; returns `false` if the key is not a navigation key
    fn handle_navigation(&mut self, key: &KeyEvent) -> bool;

    /// Rows taken up by the items currently in view
    fn measured_height(&self) -> usize;
}

/// Cursor and scroll state for the snippet list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListState {
    len: usize,
    cursor: usize,
    scroll_offset: usize,
    /// How many items fit in the viewport
    visible_items: usize,
}

impl Default for ItemListState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ItemListState {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            len,
            cursor: 0,
            scroll_offset: 0,
            visible_items: 1,
        }
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Resize the viewport to `rows` terminal rows
    pub fn set_viewport_rows(&mut self, rows: usize) {
        self.visible_items = (rows / ITEM_HEIGHT).max(1);
        self.adjust_scroll();
    }

    /// Move cursor up
    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor down
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.len {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Move cursor up by one page
    pub fn page_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(self.visible_items);
        self.adjust_scroll();
    }

    /// Move cursor down by one page
    pub fn page_down(&mut self) {
        let max_cursor = self.len.saturating_sub(1);
        self.cursor = (self.cursor + self.visible_items).min(max_cursor);
        self.adjust_scroll();
    }

    /// Jump to first item
    pub fn jump_to_start(&mut self) {
        self.cursor = 0;
        self.adjust_scroll();
    }

    /// Jump to last item
    pub fn jump_to_end(&mut self) {
        self.cursor = self.len.saturating_sub(1);
        self.adjust_scroll();
    }

    /// Keep the cursor inside the viewport
    fn adjust_scroll(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.visible_items {
            self.scroll_offset = self.cursor + 1 - self.visible_items;
        }
        let max_offset = self.len.saturating_sub(self.visible_items);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }
}

impl ListNavigator for ItemListState {
    fn set_items(&mut self, count: usize) {
        self.len = count;
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
        self.adjust_scroll();
    }

    fn selected_index(&self) -> Option<usize> {
        (self.cursor < self.len).then_some(self.cursor)
    }

    fn handle_navigation(&mut self, key: &KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::CONTROL) => self.cursor_up(),
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::CONTROL) => self.cursor_down(),
            (KeyCode::PageUp, _) => self.page_up(),
            (KeyCode::PageDown, _) => self.page_down(),
            (KeyCode::Home, _) => self.jump_to_start(),
            (KeyCode::End, _) => self.jump_to_end(),
            _ => return false,
        }
        true
    }

    fn measured_height(&self) -> usize {
        let shown = self.len.saturating_sub(self.scroll_offset).min(self.visible_items);
        shown * ITEM_HEIGHT
    }
}

/// Bordered list of snippets with a cursor marker
pub struct ItemList<'a> {
    snippets: &'a [Snippet],
    /// Indices into `snippets` in display order
    view: &'a [usize],
    state: &'a ItemListState,
    theme: &'a Theme,
    title: String,
}

impl<'a> ItemList<'a> {
    /// Create a new item list widget
    #[must_use]
    pub fn new(
        snippets: &'a [Snippet],
        view: &'a [usize],
        state: &'a ItemListState,
        theme: &'a Theme,
    ) -> Self {
        let title = format!(" Snippets ({}/{}) ", view.len(), snippets.len());
        Self {
            snippets,
            view,
            state,
            theme,
            title,
        }
    }

    fn render_item(&self, snippet: &'a Snippet, is_cursor: bool) -> ListItem<'a> {
        let marker = if is_cursor { ">" } else { " " };
        let title_style = if is_cursor {
            self.theme.selected_style()
        } else {
            self.theme.normal_style()
        };

        let text = Text::from(vec![
            Line::from(vec![
                Span::styled(marker, self.theme.cursor_style()),
                Span::raw(" "),
                Span::styled(snippet.title.as_str(), title_style),
            ]),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(snippet.description.as_str(), self.theme.dimmed_style()),
            ]),
        ]);
        ListItem::new(text)
    }
}

impl Widget for ItemList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(self.title.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let fits = (inner.height as usize / ITEM_HEIGHT).max(1);
        let start = self.state.scroll_offset();
        let end = (start + fits).min(self.view.len());

        let items: Vec<ListItem> = (start..end)
            .filter_map(|position| {
                let snippet = self.snippets.get(*self.view.get(position)?)?;
                Some(self.render_item(snippet, position == self.state.cursor()))
            })
            .collect();

        List::new(items).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cursor_navigation() {
        let mut state = ItemListState::new(5);
        assert_eq!(state.selected_index(), Some(0));

        assert!(state.handle_navigation(&key(KeyCode::Down)));
        assert_eq!(state.selected_index(), Some(1));

        state.handle_navigation(&key(KeyCode::End));
        assert_eq!(state.selected_index(), Some(4));

        // Should not go past end
        state.handle_navigation(&key(KeyCode::Down));
        assert_eq!(state.selected_index(), Some(4));

        state.handle_navigation(&key(KeyCode::Home));
        assert_eq!(state.selected_index(), Some(0));

        state.handle_navigation(&KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL));
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn test_non_navigation_key_is_ignored() {
        let mut state = ItemListState::new(3);
        assert!(!state.handle_navigation(&key(KeyCode::Char('x'))));
        assert!(!state.handle_navigation(&key(KeyCode::Enter)));
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn test_empty_list_has_no_selection() {
        let mut state = ItemListState::new(0);
        assert_eq!(state.selected_index(), None);
        state.handle_navigation(&key(KeyCode::Down));
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn test_set_items_clamps_cursor() {
        let mut state = ItemListState::new(10);
        state.jump_to_end();
        state.set_items(3);
        assert_eq!(state.selected_index(), Some(2));
        state.set_items(0);
        assert_eq!(state.selected_index(), None);
    }

    #[test]
    fn test_paging_scrolls_viewport() {
        let mut state = ItemListState::new(20);
        state.set_viewport_rows(8);
        assert_eq!(state.measured_height(), 8);

        state.handle_navigation(&key(KeyCode::PageDown));
        assert_eq!(state.selected_index(), Some(4));
        assert_eq!(state.scroll_offset(), 1);

        state.handle_navigation(&key(KeyCode::PageUp));
        assert_eq!(state.selected_index(), Some(0));
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn test_measured_height_near_end() {
        let mut state = ItemListState::new(3);
        state.set_viewport_rows(20);
        assert_eq!(state.measured_height(), 6);
    }
}
