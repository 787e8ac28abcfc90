//! Terminal driver for the snippet browser
//!
//! Owns the terminal for the lifetime of one session: raw mode and the
//! alternate screen go on before the first frame and are always restored,
//! even when the loop fails.

use super::layout::Geometry;
use super::render::{View, draw};
use super::session::{Outcome, Session};
use super::styled_preview::{CodePreview, Highlighter};
use super::theme::Theme;
use crate::model::{Snippet, SnippetId};
use crate::store::SnippetStore;
use crate::ui::clipboard::OutputSink;
use crate::ui::error::Result;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{self, Stdout};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PreviewKey {
    id: SnippetId,
    width: u16,
    max_lines: usize,
    content: u64,
}

impl PreviewKey {
    fn new(snippet: &Snippet, width: u16, max_lines: usize) -> Self {
        let mut hasher = DefaultHasher::new();
        snippet.code.hash(&mut hasher);
        snippet.language.hash(&mut hasher);
        Self {
            id: snippet.id,
            width,
            max_lines,
            content: hasher.finish(),
        }
    }
}

/// Highlighted preview of the last selected snippet
///
/// Highlighting is only redone when the selection, the pane width or the
/// snippet itself changes.
#[derive(Debug, Default)]
pub struct PreviewCache {
    entry: Option<(PreviewKey, CodePreview)>,
    builds: usize,
}

impl PreviewCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preview of `snippet` for a pane of the given geometry
    pub fn get(
        &mut self,
        highlighter: &dyn Highlighter,
        snippet: &Snippet,
        geometry: &Geometry,
        max_lines: usize,
    ) -> &CodePreview {
        let width = geometry.preview_width();
        // One row stays free for the truncation marker
        let max_lines = max_lines
            .min(usize::from(geometry.preview_height.saturating_sub(1)))
            .max(1);
        let key = PreviewKey::new(snippet, width, max_lines);

        if self.entry.as_ref().is_some_and(|(cached, _)| *cached != key) {
            self.entry = None;
        }
        let builds = &mut self.builds;
        let (_, preview) = self.entry.get_or_insert_with(|| {
            *builds += 1;
            let preview = CodePreview::build(
                highlighter,
                &snippet.code,
                &snippet.language,
                max_lines,
                usize::from(width),
            );
            (key, preview)
        });
        preview
    }

    /// Number of previews built so far
    #[must_use]
    pub const fn builds(&self) -> usize {
        self.builds
    }
}

/// Runs a [`Session`] on the real terminal
pub struct SearchRunner {
    highlighter: Box<dyn Highlighter>,
    theme: Theme,
    preview_max_lines: usize,
    cache: PreviewCache,
}

impl SearchRunner {
    #[must_use]
    pub fn new(highlighter: Box<dyn Highlighter>, preview_max_lines: usize) -> Self {
        Self {
            highlighter,
            theme: Theme::default(),
            preview_max_lines,
            cache: PreviewCache::new(),
        }
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend).map_err(Into::into)
    }

    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stdout(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Drive the session until it quits or copies a snippet
    ///
    /// # Errors
    ///
    /// Returns `UiError::IoError` if the terminal cannot be set up, drawn
    /// or read.
    pub fn run<S, K>(&mut self, session: &mut Session<S, K>) -> Result<Outcome>
    where
        S: SnippetStore,
        K: OutputSink,
    {
        let mut terminal = Self::setup_terminal()?;

        let result = self.run_loop(&mut terminal, session);

        // Restore the terminal even when the loop failed
        if let Err(e) = Self::cleanup_terminal() {
            warn!(error = %e, "terminal cleanup failed");
            eprintln!("Warning: terminal cleanup failed: {e}");
        }

        result
    }

    fn run_loop<S, K>(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        session: &mut Session<S, K>,
    ) -> Result<Outcome>
    where
        S: SnippetStore,
        K: OutputSink,
    {
        let size = terminal.size()?;
        session.resize(size.width, size.height);

        let Self {
            highlighter,
            theme,
            preview_max_lines,
            cache,
        } = self;

        loop {
            let preview = match (
                session.state().browser().and_then(|b| b.selected()),
                session.geometry(),
            ) {
                (Some(snippet), Some(geometry)) => {
                    Some(cache.get(&**highlighter, snippet, geometry, *preview_max_lines))
                }
                _ => None,
            };

            let view = View {
                state: session.state(),
                notice: session.notice(),
                preview,
                geometry: session.geometry(),
                edit_geometry: session.edit_geometry(),
                settings: session.settings(),
            };
            terminal.draw(|frame| draw(frame, &view, theme))?;

            let event = event::read()?;
            match session.handle_event(&event) {
                Outcome::Continue => {}
                outcome => return Ok(outcome),
            }
        }
    }
}
