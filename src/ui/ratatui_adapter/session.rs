//! The browsing session state machine
//!
//! Every terminal event goes through [`Session::handle_event`], which runs
//! one transition to completion. Store and sink calls happen synchronously
//! inside the transition that needs them. Their failures become inline
//! messages; only the initial load can end the session with an error.
//!
//! | State | Key | Effect |
//! |---|---|---|
//! | browsing | printable | extend query |
//! | browsing | Backspace | drop last query char |
//! | browsing | Esc | clear query, or quit when empty |
//! | browsing | Enter | copy selection and quit |
//! | browsing | Ctrl+D / Ctrl+E | confirm delete / edit selection |
//! | confirming | y, z / n, Esc | delete / back to browsing |
//! | editing | Tab, Shift+Tab | move focus |
//! | editing | Ctrl+S / Esc | save / cancel, then reload |
//! | any | Ctrl+C | quit |

use crate::db::DbError;
use crate::model::SnippetId;
use crate::store::SnippetStore;
use crate::ui::clipboard::OutputSink;
use crate::ui::error::UiError;
use crate::ui::ratatui_adapter::layout::{EditGeometry, Geometry};
use crate::ui::ratatui_adapter::state::{Browser, Editor, PendingDelete, SessionState};
use crate::ui::ratatui_adapter::widgets::ListNavigator;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::mem;
use tracing::{debug, info, warn};

/// Result of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Keep running the event loop
    Continue,
    /// The user quit without choosing a snippet
    Quit,
    /// The snippet's code was handed to the sink
    Copied(SnippetId),
}

/// Tunables the session takes from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Share of the width given to the list pane, in percent
    pub list_width_percent: u16,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            list_width_percent: 40,
        }
    }
}

/// Interactive session over a snippet store
pub struct Session<S: SnippetStore, K: OutputSink> {
    store: S,
    sink: K,
    settings: SessionSettings,
    state: SessionState,
    geometry: Option<Geometry>,
    edit_geometry: Option<EditGeometry>,
    /// One-shot message, cleared by the next key
    notice: Option<String>,
}

fn is_text_input(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

impl<S: SnippetStore, K: OutputSink> Session<S, K> {
    /// Load every snippet and enter browsing
    ///
    /// # Errors
    ///
    /// Returns `UiError::Load` if the store cannot be read and
    /// `UiError::Empty` if it holds no snippets.
    pub fn start(store: S, sink: K, settings: SessionSettings) -> Result<Self, UiError> {
        let entries = store.load_all().map_err(UiError::Load)?;
        if entries.is_empty() {
            return Err(UiError::Empty);
        }
        info!(count = entries.len(), "loaded snippets");

        Ok(Self {
            store,
            sink,
            settings,
            state: SessionState::Browsing(Browser::new(entries)),
            geometry: None,
            edit_geometry: None,
            notice: None,
        })
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    #[must_use]
    pub const fn settings(&self) -> SessionSettings {
        self.settings
    }

    #[must_use]
    pub const fn edit_geometry(&self) -> Option<&EditGeometry> {
        self.edit_geometry.as_ref()
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    /// Give back the sink, e.g. to print held output after the TUI exits
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Dispatch a terminal event
    pub fn handle_event(&mut self, event: &Event) -> Outcome {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Resize(width, height) => {
                self.resize(*width, *height);
                Outcome::Continue
            }
            _ => Outcome::Continue,
        }
    }

    /// Recompute geometry for a new terminal size; state contents are kept
    pub fn resize(&mut self, width: u16, height: u16) {
        let geometry = Geometry::compute(width, height, self.settings.list_width_percent);
        let edit_geometry = EditGeometry::compute(width, height);
        self.geometry = Some(geometry);
        self.edit_geometry = Some(edit_geometry);

        match &mut self.state {
            SessionState::Browsing(browser) | SessionState::ConfirmingDelete { browser, .. } => {
                browser.resize(&geometry);
            }
            SessionState::Editing(editor) => editor.resize(&edit_geometry, &geometry),
        }
    }

    /// Dispatch a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Outcome::Quit;
        }
        self.notice = None;

        let before = self.state.name();
        let (next, outcome) = match mem::take(&mut self.state) {
            SessionState::Browsing(browser) => self.browse_key(browser, key),
            SessionState::ConfirmingDelete { browser, pending } => {
                (self.confirm_key(browser, pending, key), Outcome::Continue)
            }
            SessionState::Editing(editor) => (self.edit_key(*editor, key), Outcome::Continue),
        };

        if next.name() != before {
            debug!(from = before, to = next.name(), "session transition");
        }
        self.state = next;
        outcome
    }

    fn browse_key(&mut self, mut browser: Browser, key: KeyEvent) -> (SessionState, Outcome) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                if browser.query().is_empty() {
                    return (SessionState::Browsing(browser), Outcome::Quit);
                }
                browser.query_clear();
            }
            (KeyCode::Enter, _) => {
                if let Some(id) = self.copy_selected(&browser) {
                    return (SessionState::Browsing(browser), Outcome::Copied(id));
                }
            }
            (KeyCode::Char('d'), m) if m.contains(KeyModifiers::CONTROL) => {
                if let Some(snippet) = browser.selected() {
                    let pending = PendingDelete::for_snippet(snippet);
                    return (
                        SessionState::ConfirmingDelete { browser, pending },
                        Outcome::Continue,
                    );
                }
            }
            (KeyCode::Char('e'), m) if m.contains(KeyModifiers::CONTROL) => {
                if let Some(snippet) = browser.selected().cloned() {
                    let mut editor = Editor::new(&snippet, browser);
                    if let (Some(edit), Some(browse)) = (&self.edit_geometry, &self.geometry) {
                        editor.resize(edit, browse);
                    }
                    return (SessionState::Editing(Box::new(editor)), Outcome::Continue);
                }
            }
            (KeyCode::Backspace, _) => browser.query_backspace(),
            (KeyCode::Char(c), m) if is_text_input(m) => browser.query_push(c),
            _ => {
                browser.list_mut().handle_navigation(&key);
            }
        }
        (SessionState::Browsing(browser), Outcome::Continue)
    }

    /// Send the selected code to the sink and count the use
    fn copy_selected(&mut self, browser: &Browser) -> Option<SnippetId> {
        let snippet = browser.selected()?;
        if let Err(e) = self.sink.write(&snippet.code) {
            warn!(error = %e, "copy failed");
            self.notice = Some(format!("Copy failed: {e}"));
            return None;
        }
        if let Err(e) = self.store.record_usage(snippet.id) {
            warn!(id = snippet.id.0, error = %e, "could not record usage");
        }
        Some(snippet.id)
    }

    fn confirm_key(
        &mut self,
        mut browser: Browser,
        mut pending: PendingDelete,
        key: KeyEvent,
    ) -> SessionState {
        match (key.code, key.modifiers) {
            (KeyCode::Char('y' | 'Y' | 'z' | 'Z'), m) if is_text_input(m) => {
                match self.store.delete(pending.id) {
                    Ok(()) => {
                        browser.remove(pending.id);
                        info!(id = pending.id.0, "deleted snippet");
                        return SessionState::Browsing(browser);
                    }
                    Err(e) => {
                        warn!(id = pending.id.0, error = %e, "delete failed");
                        pending.message = format!("Delete failed: {e}");
                    }
                }
            }
            (KeyCode::Char('n' | 'N'), m) if is_text_input(m) => {
                return SessionState::Browsing(browser);
            }
            (KeyCode::Esc, _) => return SessionState::Browsing(browser),
            _ => {
                browser.list_mut().handle_navigation(&key);
            }
        }
        SessionState::ConfirmingDelete { browser, pending }
    }

    fn edit_key(&mut self, mut editor: Editor, key: KeyEvent) -> SessionState {
        match (key.code, key.modifiers) {
            (KeyCode::Tab, _) => editor.focus_next(),
            (KeyCode::BackTab, _) => editor.focus_prev(),
            (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => {
                return self.save(editor);
            }
            (KeyCode::Esc, _) => return self.cancel(editor),
            _ => {
                editor.focused_mut().handle_key(&key);
            }
        }
        SessionState::Editing(Box::new(editor))
    }

    fn save(&mut self, mut editor: Editor) -> SessionState {
        let id = editor.id();
        let edit = editor.edit();
        if let Err(e) = self.store.update(id, &edit) {
            warn!(id = id.0, error = %e, "save failed");
            editor.status = Some(format!("Save failed: {e}"));
            return SessionState::Editing(Box::new(editor));
        }
        info!(id = id.0, "saved snippet");

        match self.reload() {
            Ok(browser) => SessionState::Browsing(browser),
            Err(e) => {
                warn!(error = %e, "reload after save failed");
                let mut browser = editor.into_origin();
                browser.apply_edit(id, &edit);
                self.notice = Some(format!("Saved, but reload failed: {e}"));
                SessionState::Browsing(browser)
            }
        }
    }

    fn cancel(&mut self, editor: Editor) -> SessionState {
        match self.reload() {
            Ok(browser) => SessionState::Browsing(browser),
            Err(e) => {
                warn!(error = %e, "reload after cancel failed");
                self.notice = Some(format!("Reload failed: {e}"));
                SessionState::Browsing(editor.into_origin())
            }
        }
    }

    /// Fresh browser from the store, sized to the terminal
    fn reload(&self) -> Result<Browser, DbError> {
        let mut browser = Browser::new(self.store.load_all()?);
        if let Some(geometry) = &self.geometry {
            browser.resize(geometry);
        }
        Ok(browser)
    }
}
