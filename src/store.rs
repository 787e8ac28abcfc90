//! The item-store capability consumed by the browsing session
//!
//! The session only needs four operations, so it depends on this trait rather
//! than on [`Database`] directly. The connection itself is opened and closed
//! by the caller; the session borrows it for its lifetime.

use crate::db::{Database, DbError};
use crate::model::{Snippet, SnippetEdit, SnippetId};

/// Narrow storage interface used by the TUI session
pub trait SnippetStore {
    /// Load every snippet in browsing order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the snippets cannot be read.
    fn load_all(&self) -> Result<Vec<Snippet>, DbError>;

    /// # Errors
    ///
    /// Returns `DbError` if the snippet is missing or the write fails.
    fn delete(&self, id: SnippetId) -> Result<(), DbError>;

    /// # Errors
    ///
    /// Returns `DbError` if the snippet is missing or the write fails.
    fn update(&self, id: SnippetId, edit: &SnippetEdit) -> Result<(), DbError>;

    /// # Errors
    ///
    /// Returns `DbError` if the snippet is missing or the write fails.
    fn record_usage(&self, id: SnippetId) -> Result<(), DbError>;
}

impl SnippetStore for Database {
    fn load_all(&self) -> Result<Vec<Snippet>, DbError> {
        Self::load_all(self)
    }

    fn delete(&self, id: SnippetId) -> Result<(), DbError> {
        Self::delete(self, id)
    }

    fn update(&self, id: SnippetId, edit: &SnippetEdit) -> Result<(), DbError> {
        Self::update(self, id, edit)
    }

    fn record_usage(&self, id: SnippetId) -> Result<(), DbError> {
        Self::record_usage(self, id)
    }
}

impl<T: SnippetStore + ?Sized> SnippetStore for &T {
    fn load_all(&self) -> Result<Vec<Snippet>, DbError> {
        (**self).load_all()
    }

    fn delete(&self, id: SnippetId) -> Result<(), DbError> {
        (**self).delete(id)
    }

    fn update(&self, id: SnippetId, edit: &SnippetEdit) -> Result<(), DbError> {
        (**self).update(id, edit)
    }

    fn record_usage(&self, id: SnippetId) -> Result<(), DbError> {
        (**self).record_usage(id)
    }
}
