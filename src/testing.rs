//! Testing utilities for zeno
//!
//! In-memory stand-ins for the store, the output sink and the interactive
//! prompts, plus a `TestDb` wrapper for tests that need a real sled store.
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::{Database, DbError};
use crate::model::{Snippet, SnippetEdit, SnippetId};
use crate::store::SnippetStore;
use crate::ui::clipboard::{OutputSink, SinkError};
use crate::ui::input::{InputError, UserInput};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::Mutex;
use tempfile::TempDir;

/// Three snippets with distinct titles, in store order
///
/// "db" matches the first and the last, "tar" only the second and
/// "connect" only the first.
#[must_use]
pub fn sample_snippets() -> Vec<Snippet> {
    vec![
        Snippet {
            id: SnippetId(1),
            title: "Connect to Postgres".into(),
            description: "Open a psql session against the dev db".into(),
            code: "psql -h localhost -U dev app_db".into(),
            keywords: "postgres, psql, db".into(),
            usage_count: 7,
            last_used: 1_700_000_300,
            language: "bash".into(),
            formatters: "shfmt".into(),
        },
        Snippet {
            id: SnippetId(2),
            title: "Archive a directory".into(),
            description: "Create a compressed tarball".into(),
            code: "tar -czf out.tar.gz dir/".into(),
            keywords: "tar, gzip".into(),
            usage_count: 3,
            last_used: 1_700_000_200,
            language: "bash".into(),
            formatters: "shfmt".into(),
        },
        Snippet {
            id: SnippetId(3),
            title: "Dump database".into(),
            description: "Write a SQL dump of the app".into(),
            code: "pg_dump app > app.sql".into(),
            keywords: "postgres, backup, db".into(),
            usage_count: 0,
            last_used: 0,
            language: String::new(),
            formatters: String::new(),
        },
    ]
}

fn injected() -> DbError {
    DbError::InvalidInput("injected failure".into())
}

/// Snippet store held in memory, with switchable failures
///
/// `load_all` returns snippets in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snippets: RefCell<Vec<Snippet>>,
    fail_loads: Cell<bool>,
    fail_writes: Cell<bool>,
    updates: Cell<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(snippets: Vec<Snippet>) -> Self {
        Self {
            snippets: RefCell::new(snippets),
            ..Self::default()
        }
    }

    /// Make every following `load_all` fail
    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.set(fail);
    }

    /// Make every following write (delete, update, usage) fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    #[must_use]
    pub fn usage_of(&self, id: SnippetId) -> Option<u64> {
        self.snippets
            .borrow()
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.usage_count)
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Snippet> {
        self.snippets.borrow().clone()
    }

    /// Drop a snippet without the session knowing about it
    pub fn remove_behind_the_back(&self, id: SnippetId) {
        self.snippets.borrow_mut().retain(|s| s.id != id);
    }

    /// Number of successful updates
    #[must_use]
    pub fn updates(&self) -> usize {
        self.updates.get()
    }

    fn with_snippet(
        &self,
        id: SnippetId,
        f: impl FnOnce(&mut Snippet),
    ) -> Result<(), DbError> {
        if self.fail_writes.get() {
            return Err(injected());
        }
        let mut snippets = self.snippets.borrow_mut();
        let snippet = snippets
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(DbError::SnippetNotFound(id.0))?;
        f(snippet);
        Ok(())
    }
}

impl SnippetStore for MemoryStore {
    fn load_all(&self) -> Result<Vec<Snippet>, DbError> {
        if self.fail_loads.get() {
            return Err(injected());
        }
        Ok(self.snapshot())
    }

    fn delete(&self, id: SnippetId) -> Result<(), DbError> {
        if self.fail_writes.get() {
            return Err(injected());
        }
        let mut snippets = self.snippets.borrow_mut();
        let before = snippets.len();
        snippets.retain(|s| s.id != id);
        if snippets.len() == before {
            return Err(DbError::SnippetNotFound(id.0));
        }
        Ok(())
    }

    fn update(&self, id: SnippetId, edit: &SnippetEdit) -> Result<(), DbError> {
        self.with_snippet(id, |snippet| snippet.apply(edit))?;
        self.updates.set(self.updates.get() + 1);
        Ok(())
    }

    fn record_usage(&self, id: SnippetId) -> Result<(), DbError> {
        self.with_snippet(id, |snippet| snippet.usage_count += 1)
    }
}

/// Output sink that remembers everything written to it
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub written: Vec<String>,
    fail: bool,
}

impl RecordingSink {
    /// A sink whose every write fails
    #[must_use]
    pub fn failing() -> Self {
        Self {
            written: Vec::new(),
            fail: true,
        }
    }
}

impl OutputSink for RecordingSink {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        if self.fail {
            return Err(SinkError::Io(std::io::Error::other("sink unavailable")));
        }
        self.written.push(text.to_string());
        Ok(())
    }
}

/// One scripted answer for [`ScriptedInput`]
#[derive(Debug, Clone)]
pub enum Answer {
    Text(&'static str),
    Select(usize),
    Editor(&'static str),
    Cancel,
}

/// Prompt backend that replays a fixed list of answers
///
/// Prompts are recorded so tests can check what was asked. Running out of
/// answers, or getting an answer of the wrong kind, is an `InputError`.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: Mutex<VecDeque<Answer>>,
    prompts: Mutex<Vec<String>>,
    /// Items offered by the last select prompt
    offered: Mutex<Vec<String>>,
}

impl ScriptedInput {
    #[must_use]
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn offered(&self) -> Vec<String> {
        self.offered.lock().map(|o| o.clone()).unwrap_or_default()
    }

    fn next(&self, prompt: &str) -> Result<Answer, InputError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        self.answers
            .lock()
            .ok()
            .and_then(|mut answers| answers.pop_front())
            .ok_or_else(|| InputError::Invalid(format!("no answer scripted for {prompt:?}")))
    }
}

fn unexpected(answer: &Answer, prompt: &str) -> InputError {
    InputError::Invalid(format!("unexpected {answer:?} for {prompt:?}"))
}

impl UserInput for ScriptedInput {
    fn prompt_text(
        &self,
        prompt: &str,
        _default: Option<&str>,
        _allow_empty: bool,
    ) -> Result<Option<String>, InputError> {
        match self.next(prompt)? {
            Answer::Text(text) => Ok(Some(text.to_string())),
            Answer::Cancel => Ok(None),
            other => Err(unexpected(&other, prompt)),
        }
    }

    fn prompt_select(
        &self,
        prompt: &str,
        items: &[String],
        _default: Option<usize>,
    ) -> Result<Option<usize>, InputError> {
        if let Ok(mut offered) = self.offered.lock() {
            *offered = items.to_vec();
        }
        match self.next(prompt)? {
            Answer::Select(index) => Ok(Some(index)),
            Answer::Cancel => Ok(None),
            other => Err(unexpected(&other, prompt)),
        }
    }

    fn prompt_editor(&self, _initial: &str) -> Result<Option<String>, InputError> {
        match self.next("editor")? {
            Answer::Editor(text) => Ok(Some(text.to_string())),
            Answer::Cancel => Ok(None),
            other => Err(unexpected(&other, "editor")),
        }
    }
}

/// Temporary sled database, removed with its directory on drop
pub struct TestDb {
    // Field order matters: the database closes before the directory goes
    db: Database,
    dir: TempDir,
}

impl TestDb {
    /// # Panics
    ///
    /// Panics if the temporary directory or the database cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open(dir.path().join("db")).expect("Failed to open test database");
        Self { db, dir }
    }

    #[must_use]
    pub const fn db(&self) -> &Database {
        &self.db
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        self.dir.path()
    }
}

impl Default for TestDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_starts_empty() {
        let test_db = TestDb::new();
        assert_eq!(test_db.db().count(), 0);
        assert!(test_db.path().exists());
    }

    #[test]
    fn test_db_cleanup() {
        let path = {
            let test_db = TestDb::new();
            test_db.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_memory_store_failures_are_switchable() {
        let store = MemoryStore::new(sample_snippets());
        store.fail_loads(true);
        assert!(store.load_all().is_err());
        store.fail_loads(false);
        assert_eq!(store.load_all().unwrap().len(), 3);

        store.fail_writes(true);
        assert!(store.record_usage(SnippetId(1)).is_err());
        assert_eq!(store.usage_of(SnippetId(1)), Some(7));
    }

    #[test]
    fn test_memory_store_missing_id() {
        let store = MemoryStore::new(sample_snippets());
        assert!(matches!(
            store.delete(SnippetId(42)),
            Err(DbError::SnippetNotFound(42))
        ));
        assert!(store.update(SnippetId(42), &SnippetEdit::default()).is_err());
        assert_eq!(store.updates(), 0);
    }

    #[test]
    fn test_scripted_input_replays_answers() {
        let input = ScriptedInput::new([Answer::Text("hello"), Answer::Select(1)]);
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(input.prompt_text("Name", None, false).unwrap().as_deref(), Some("hello"));
        assert_eq!(input.prompt_select("Pick", &items, None).unwrap(), Some(1));
        assert!(input.prompt_text("More", None, false).is_err());
        assert_eq!(input.prompts(), vec!["Name", "Pick", "More"]);
    }
}
