//! Database-specific error types
//!
//! Every failure the sled-backed store can produce. Errors carry enough
//! context to be shown to the user verbatim, which is how the browsing
//! session surfaces failed deletes and saves.

use thiserror::Error;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// A tree key did not have the expected width
    #[error("Corrupt record key of {0} bytes")]
    InvalidKey(usize),

    /// No snippet is stored under the identifier
    #[error("Snippet {0} not found")]
    SnippetNotFound(u64),

    /// No language with that name exists
    #[error("Language not found: {0}")]
    LanguageNotFound(String),

    /// The language is still referenced by snippets
    #[error("Language '{name}' is used by {count} snippet(s)")]
    LanguageInUse { name: String, count: usize },

    /// Invalid input provided (e.g. an empty title or a duplicate language)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
