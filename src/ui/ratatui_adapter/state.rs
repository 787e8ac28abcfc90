//! Session state for the snippet browser
//!
//! The session is always in exactly one [`SessionState`]. Each state owns
//! the data it needs, so leaving a state hands that data over to the next
//! one instead of copying it.

use crate::filter::filter_indices;
use crate::model::{Snippet, SnippetEdit, SnippetId};
use crate::ui::ratatui_adapter::layout::{EditGeometry, Geometry};
use crate::ui::ratatui_adapter::widgets::{ItemListState, ListNavigator, TextAreaState};

/// Browsing data: the full entry set, the query and the filtered view
#[derive(Debug, Clone, Default)]
pub struct Browser {
    entries: Vec<Snippet>,
    query: String,
    /// Indices into `entries`, in store order
    view: Vec<usize>,
    list: ItemListState,
}

impl Browser {
    #[must_use]
    pub fn new(entries: Vec<Snippet>) -> Self {
        let view: Vec<usize> = (0..entries.len()).collect();
        let list = ItemListState::new(view.len());
        Self {
            entries,
            query: String::new(),
            view,
            list,
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Snippet] {
        &self.entries
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn view(&self) -> &[usize] {
        &self.view
    }

    /// Snippets in the filtered view, in display order
    pub fn visible(&self) -> impl Iterator<Item = &Snippet> {
        self.view.iter().filter_map(|&index| self.entries.get(index))
    }

    #[must_use]
    pub const fn list(&self) -> &ItemListState {
        &self.list
    }

    pub const fn list_mut(&mut self) -> &mut ItemListState {
        &mut self.list
    }

    /// The snippet under the cursor, `None` when nothing matches
    #[must_use]
    pub fn selected(&self) -> Option<&Snippet> {
        let position = self.list.selected_index()?;
        self.entries.get(*self.view.get(position)?)
    }

    pub fn query_push(&mut self, c: char) {
        self.query.push(c);
        self.refilter(true);
    }

    /// Remove the last character of the query
    pub fn query_backspace(&mut self) {
        if self.query.pop().is_some() {
            self.refilter(true);
        }
    }

    pub fn query_clear(&mut self) {
        self.query.clear();
        self.refilter(true);
    }

    /// Drop a snippet from the entry set; returns whether it was present
    pub fn remove(&mut self, id: SnippetId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.refilter(false);
        }
        removed
    }

    /// Apply an edit to the in-memory copy of a snippet
    pub fn apply_edit(&mut self, id: SnippetId, edit: &SnippetEdit) {
        if let Some(snippet) = self.entries.iter_mut().find(|s| s.id == id) {
            snippet.apply(edit);
            self.refilter(false);
        }
    }

    pub fn resize(&mut self, geometry: &Geometry) {
        self.list.set_viewport_rows(geometry.list_rows as usize);
    }

    /// Recompute the view; a new query moves the cursor back to the top
    fn refilter(&mut self, reset_cursor: bool) {
        self.view = filter_indices(&self.entries, &self.query);
        if reset_cursor {
            self.list.jump_to_start();
        }
        self.list.set_items(self.view.len());
    }
}

/// A delete waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: SnippetId,
    /// Prompt shown in the footer; replaced by the reason if the delete fails
    pub message: String,
}

impl PendingDelete {
    #[must_use]
    pub fn for_snippet(snippet: &Snippet) -> Self {
        Self {
            id: snippet.id,
            message: format!(
                "Delete snippet {:?} (id={})? Press Y to confirm, N or ESC to cancel.",
                snippet.title, snippet.id
            ),
        }
    }
}

/// Editor fields in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditField {
    #[default]
    Title,
    Description,
    Keywords,
    Code,
}

impl EditField {
    pub const ALL: [Self; 4] = [Self::Title, Self::Description, Self::Keywords, Self::Code];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    #[must_use]
    pub const fn prev(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "TITLE",
            Self::Description => "DESCRIPTION",
            Self::Keywords => "KEYWORDS",
            Self::Code => "CODE",
        }
    }
}

/// In-progress edit of one snippet
#[derive(Debug, Clone)]
pub struct Editor {
    id: SnippetId,
    fields: [TextAreaState; 4],
    focus: EditField,
    /// Inline error from the last failed save
    pub status: Option<String>,
    /// Browser to fall back to if the store cannot be reloaded
    origin: Browser,
}

impl Editor {
    #[must_use]
    pub fn new(snippet: &Snippet, origin: Browser) -> Self {
        Self {
            id: snippet.id,
            fields: [
                TextAreaState::new(&snippet.title).single_line(),
                TextAreaState::new(&snippet.description),
                TextAreaState::new(&snippet.keywords),
                TextAreaState::new(&snippet.code),
            ],
            focus: EditField::Title,
            status: None,
            origin,
        }
    }

    #[must_use]
    pub const fn id(&self) -> SnippetId {
        self.id
    }

    #[must_use]
    pub const fn focus(&self) -> EditField {
        self.focus
    }

    #[must_use]
    pub fn field(&self, field: EditField) -> &TextAreaState {
        &self.fields[field.index()]
    }

    pub fn focused_mut(&mut self) -> &mut TextAreaState {
        &mut self.fields[self.focus.index()]
    }

    pub const fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub const fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Buffer contents as an edit, trimmed except for the code
    #[must_use]
    pub fn edit(&self) -> SnippetEdit {
        SnippetEdit::trimmed(
            &self.field(EditField::Title).text(),
            &self.field(EditField::Description).text(),
            &self.field(EditField::Keywords).text(),
            self.field(EditField::Code).text(),
        )
    }

    pub fn into_origin(self) -> Browser {
        self.origin
    }

    /// Fit every buffer to the editor geometry; contents are untouched
    pub fn resize(&mut self, geometry: &EditGeometry, browse: &Geometry) {
        let width = geometry.text_width() as usize;
        for (field, height) in self.fields.iter_mut().zip(geometry.field_heights()) {
            field.set_size(width, height as usize);
        }
        self.origin.resize(browse);
    }
}

/// The three session states
#[derive(Debug, Clone)]
pub enum SessionState {
    Browsing(Browser),
    ConfirmingDelete {
        browser: Browser,
        pending: PendingDelete,
    },
    Editing(Box<Editor>),
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Browsing(Browser::default())
    }
}

impl SessionState {
    /// The browser backing the list pane, if one is on screen
    #[must_use]
    pub const fn browser(&self) -> Option<&Browser> {
        match self {
            Self::Browsing(browser) | Self::ConfirmingDelete { browser, .. } => Some(browser),
            Self::Editing(_) => None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Browsing(_) => "browsing",
            Self::ConfirmingDelete { .. } => "confirming-delete",
            Self::Editing(_) => "editing",
        }
    }
}
