//! Status output for the non-interactive commands
//!
//! Commands report through [`OutputWriter`] so the same code can print to
//! the terminal or collect messages in a [`BufferedWriter`].

use colored::Colorize;
use std::sync::Mutex;

/// Destination for command status messages
///
/// # Examples
///
/// ```
/// use zeno::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new(false);
/// output.success("Added snippet 3");
/// output.error("Language not found: cobol");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Plain result line, e.g. one row of a listing
    fn write(&self, message: &str);

    fn error(&self, message: &str);

    fn success(&self, message: &str);

    fn warning(&self, message: &str);

    /// Secondary detail, dimmed on a terminal
    fn info(&self, message: &str);
}

/// Colored stdout/stderr output
///
/// In quiet mode only listings, warnings and errors are printed.
pub struct StdoutWriter {
    quiet: bool,
}

impl StdoutWriter {
    #[must_use]
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message);
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "⚠️".yellow(), message);
    }

    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message.dimmed());
        }
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Warning,
    Info,
}

/// Collects messages in memory instead of printing them
#[derive(Debug, Default)]
pub struct BufferedWriter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl BufferedWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message so far, oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Messages of one level, oldest first
    #[must_use]
    pub fn of_level(&self, level: MessageLevel) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }

    fn push(&self, level: MessageLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

impl OutputWriter for BufferedWriter {
    fn write(&self, message: &str) {
        self.push(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.push(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.push(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.push(MessageLevel::Info, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffered_writer_keeps_order() {
        let writer = BufferedWriter::new();

        writer.success("saved");
        writer.error("failed");
        writer.write("row");

        let messages = writer.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0], (MessageLevel::Success, "saved".to_string()));
        assert_eq!(messages[1].0, MessageLevel::Error);
        assert_eq!(messages[2].1, "row");
    }

    #[test]
    fn test_buffered_writer_filters_by_level() {
        let writer = BufferedWriter::new();
        writer.info("a");
        writer.warning("b");
        writer.info("c");
        assert_eq!(writer.of_level(MessageLevel::Info), vec!["a", "c"]);
        assert!(writer.of_level(MessageLevel::Error).is_empty());
    }
}
