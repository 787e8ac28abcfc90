//! Database wrapper module for zeno
//!
//! Provides a clean API for storing and retrieving snippets and languages
//! using sled as the embedded database backend.
//!
//! Uses two sled trees:
//! - `snippets`: snippet id -> `SnippetRecord`
//! - `languages`: language id -> `LanguageRecord`
//!
//! Snippets reference their language by id; [`Database::load_all`] performs
//! the join and returns snippets in browsing order.

use crate::model::{Language, LanguageId, NewSnippet, Snippet, SnippetEdit, SnippetId};
use sled::{Db, Tree};
use std::collections::HashMap;
use std::path::Path;

pub mod error;
pub mod types;

pub use error::DbError;
use types::{LanguageRecord, RecordKey, SnippetRecord, decode, encode};

/// Database wrapper that encapsulates all database operations
pub struct Database {
    db: Db,
    snippets: Tree,
    languages: Tree,
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

impl Database {
    /// Opens or creates a database at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use zeno::db::Database;
    /// let db = Database::open("my_db").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal trees cannot be
    /// created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let snippets = db.open_tree("snippets")?;
        let languages = db.open_tree("languages")?;
        Ok(Self { db, snippets, languages })
    }

    fn next_id(&self) -> Result<u64, DbError> {
        // sled ids start at zero; keep zero free so it never shows up in the UI
        Ok(self.db.generate_id()? + 1)
    }

    fn language_records(&self) -> Result<HashMap<u64, LanguageRecord>, DbError> {
        let mut records = HashMap::new();
        for result in &self.languages {
            let (key, value) = result?;
            let id = RecordKey::from_bytes(&key)?.0;
            records.insert(id, decode::<LanguageRecord>(&value)?);
        }
        Ok(records)
    }

    fn snippet_record(&self, id: SnippetId) -> Result<SnippetRecord, DbError> {
        match self.snippets.get(RecordKey(id.0).to_bytes())? {
            Some(value) => decode(&value),
            None => Err(DbError::SnippetNotFound(id.0)),
        }
    }

    fn put_snippet(&self, id: SnippetId, record: &SnippetRecord) -> Result<(), DbError> {
        self.snippets.insert(RecordKey(id.0).to_bytes(), encode(record)?)?;
        Ok(())
    }

    fn join(id: u64, record: SnippetRecord, languages: &HashMap<u64, LanguageRecord>) -> Snippet {
        let language = record.language_id.and_then(|lang| languages.get(&lang));
        Snippet {
            id: SnippetId(id),
            title: record.title,
            description: record.description,
            code: record.code,
            keywords: record.keywords,
            usage_count: record.usage_count,
            last_used: record.last_used,
            language: language.map(|l| l.name.clone()).unwrap_or_default(),
            formatters: language.map(|l| l.formatters.join(",")).unwrap_or_default(),
        }
    }

    /// Load every snippet joined with its language
    ///
    /// # Returns
    /// Snippets ordered by usage count (descending), then last use
    /// (most recent first), then id.
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or deserialization errors occur.
    pub fn load_all(&self) -> Result<Vec<Snippet>, DbError> {
        let languages = self.language_records()?;
        let mut snippets = Vec::new();
        for result in &self.snippets {
            let (key, value) = result?;
            let id = RecordKey::from_bytes(&key)?.0;
            snippets.push(Self::join(id, decode(&value)?, &languages));
        }
        snippets.sort_by(|a, b| {
            b.usage_count
                .cmp(&a.usage_count)
                .then(b.last_used.cmp(&a.last_used))
                .then(a.id.cmp(&b.id))
        });
        Ok(snippets)
    }

    /// Get a single snippet by id
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or deserialization errors occur.
    pub fn get(&self, id: SnippetId) -> Result<Option<Snippet>, DbError> {
        match self.snippets.get(RecordKey(id.0).to_bytes())? {
            Some(value) => {
                let record: SnippetRecord = decode(&value)?;
                let languages = self.language_records()?;
                Ok(Some(Self::join(id.0, record, &languages)))
            }
            None => Ok(None),
        }
    }

    /// Insert a new snippet and return its id
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` for an empty title, `DbError::LanguageNotFound`
    /// if the referenced language does not exist, or `DbError` if the write fails.
    pub fn insert(&self, snippet: &NewSnippet) -> Result<SnippetId, DbError> {
        if snippet.title.trim().is_empty() {
            return Err(DbError::InvalidInput("title must not be empty".into()));
        }
        if let Some(lang) = snippet.language
            && !self.languages.contains_key(RecordKey(lang.0).to_bytes())?
        {
            return Err(DbError::LanguageNotFound(lang.to_string()));
        }

        let id = SnippetId(self.next_id()?);
        let stamp = now();
        let record = SnippetRecord {
            title: snippet.title.clone(),
            description: snippet.description.clone(),
            code: snippet.code.clone(),
            keywords: snippet.keywords.clone(),
            usage_count: 0,
            last_used: stamp,
            created_at: stamp,
            language_id: snippet.language.map(|l| l.0),
        };
        self.put_snippet(id, &record)?;
        tracing::info!(id = id.0, title = %snippet.title, "inserted snippet");
        Ok(id)
    }

    /// Overwrite the editable fields of a snippet
    ///
    /// Also stamps the snippet as just used.
    ///
    /// # Errors
    ///
    /// Returns `DbError::SnippetNotFound` if the id is unknown, `DbError::InvalidInput` for an
    /// empty title, or `DbError` if the write fails.
    pub fn update(&self, id: SnippetId, edit: &SnippetEdit) -> Result<(), DbError> {
        let mut record = self.snippet_record(id)?;
        if edit.title.trim().is_empty() {
            return Err(DbError::InvalidInput("title must not be empty".into()));
        }
        record.title.clone_from(&edit.title);
        record.description.clone_from(&edit.description);
        record.keywords.clone_from(&edit.keywords);
        record.code.clone_from(&edit.code);
        record.last_used = now();
        self.put_snippet(id, &record)
    }

    /// Remove a snippet
    ///
    /// # Errors
    ///
    /// Returns `DbError::SnippetNotFound` if nothing was stored under the id.
    pub fn delete(&self, id: SnippetId) -> Result<(), DbError> {
        match self.snippets.remove(RecordKey(id.0).to_bytes())? {
            Some(_) => Ok(()),
            None => Err(DbError::SnippetNotFound(id.0)),
        }
    }

    /// Bump the usage count and last-used timestamp of a snippet
    ///
    /// # Errors
    ///
    /// Returns `DbError::SnippetNotFound` if the id is unknown, or `DbError` if the write fails.
    pub fn record_usage(&self, id: SnippetId) -> Result<(), DbError> {
        let mut record = self.snippet_record(id)?;
        record.usage_count = record.usage_count.saturating_add(1);
        record.last_used = now();
        self.put_snippet(id, &record)
    }

    /// Register a language
    ///
    /// Names are unique, compared case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `DbError::InvalidInput` for an empty or duplicate name, or `DbError` if the write
    /// fails.
    pub fn add_language(
        &self,
        name: &str,
        description: &str,
        formatters: Vec<String>,
    ) -> Result<LanguageId, DbError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DbError::InvalidInput("language name must not be empty".into()));
        }
        if self.find_language(name)?.is_some() {
            return Err(DbError::InvalidInput(format!("language '{name}' already exists")));
        }

        let id = self.next_id()?;
        let record = LanguageRecord {
            name: name.to_string(),
            description: description.trim().to_string(),
            formatters,
        };
        self.languages.insert(RecordKey(id).to_bytes(), encode(&record)?)?;
        Ok(LanguageId(id))
    }

    /// Remove a language that no snippet uses
    ///
    /// # Errors
    ///
    /// Returns `DbError::LanguageNotFound` if no language matches, `DbError::LanguageInUse`
    /// if snippets still reference it, or `DbError` if the write fails.
    pub fn remove_language(&self, name: &str) -> Result<(), DbError> {
        let language = self
            .find_language(name)?
            .ok_or_else(|| DbError::LanguageNotFound(name.to_string()))?;
        if language.snippet_count > 0 {
            return Err(DbError::LanguageInUse {
                name: language.name,
                count: language.snippet_count,
            });
        }
        self.languages.remove(RecordKey(language.id.0).to_bytes())?;
        Ok(())
    }

    /// List all languages with their snippet counts, sorted by name
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or deserialization errors occur.
    pub fn list_languages(&self) -> Result<Vec<Language>, DbError> {
        let mut counts: HashMap<u64, usize> = HashMap::new();
        for result in self.snippets.iter().values() {
            let record: SnippetRecord = decode(&result?)?;
            if let Some(lang) = record.language_id {
                *counts.entry(lang).or_default() += 1;
            }
        }

        let mut languages: Vec<Language> = self
            .language_records()?
            .into_iter()
            .map(|(id, record)| Language {
                id: LanguageId(id),
                name: record.name,
                description: record.description,
                formatters: record.formatters,
                snippet_count: counts.get(&id).copied().unwrap_or(0),
            })
            .collect();
        languages.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(languages)
    }

    /// Find a language by name (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or deserialization errors occur.
    pub fn find_language(&self, name: &str) -> Result<Option<Language>, DbError> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .list_languages()?
            .into_iter()
            .find(|l| l.name.to_lowercase() == wanted))
    }

    /// Get the number of snippets in the database
    #[must_use]
    pub fn count(&self) -> usize {
        self.snippets.len()
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        // Best-effort flush; callers that need durability call flush() themselves.
        let _ = self.db.flush();
    }
}
