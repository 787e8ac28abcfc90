//! Zeno - a personal snippet reference for the terminal
//!
//! Snippets (titled pieces of code with a description, keywords and a
//! language) live in an embedded sled database. The interactive browser
//! filters them as you type, previews the highlighted code and copies the
//! chosen snippet to the clipboard; snippets can be deleted and edited in
//! place without leaving it.

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod filter;
pub mod language;
pub mod logging;
pub mod model;
pub mod store;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum ZenoError {
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    #[error(transparent)]
    UiError(#[from] ui::UiError),
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    #[error("Input error: {0}")]
    InputError(#[from] ui::input::InputError),
    #[error("{0}")]
    SinkError(#[from] ui::clipboard::SinkError),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ZenoError>;
