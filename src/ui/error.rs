//! UI error types

use crate::db::DbError;
use crate::ui::clipboard::SinkError;
use thiserror::Error;

/// Errors that end an interactive session
#[derive(Debug, Error)]
pub enum UiError {
    /// The snippets could not be loaded; the session never starts
    #[error("Failed to load snippets: {0}")]
    Load(#[source] DbError),

    /// There is nothing to browse
    #[error("No snippets in database.")]
    Empty,

    /// IO error while driving the terminal
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Held output could not be written after the session
    #[error("Output error: {0}")]
    Sink(#[from] SinkError),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
