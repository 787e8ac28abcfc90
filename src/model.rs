//! Snippet and language types shared by the store, the filter and the TUI
//!
//! A [`Snippet`] is the session's view of a stored entry: the record from the
//! `snippets` tree joined with its language. The session never constructs
//! identifiers itself; they always come from the store.

use chrono::{Local, TimeZone};
use std::fmt;

/// Stable, store-assigned snippet identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnippetId(pub u64);

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Store-assigned language identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(pub u64);

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A stored snippet as seen by the browsing session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub description: String,
    pub code: String,
    /// Free-text keyword string, usually comma separated
    pub keywords: String,
    pub usage_count: u64,
    /// Unix timestamp (seconds) of the last copy or edit
    pub last_used: i64,
    /// Language name, empty when the snippet has none
    pub language: String,
    /// Formatter tools for the language, comma joined
    pub formatters: String,
}

impl Snippet {
    /// Language label for display: upper-cased, `-` when empty
    #[must_use]
    pub fn language_label(&self) -> String {
        if self.language.is_empty() {
            "-".to_string()
        } else {
            self.language.to_uppercase()
        }
    }

    #[must_use]
    pub fn formatters_label(&self) -> &str {
        if self.formatters.is_empty() {
            "-"
        } else {
            &self.formatters
        }
    }

    /// Last-used timestamp rendered in local time
    #[must_use]
    pub fn last_used_label(&self) -> String {
        match Local.timestamp_opt(self.last_used, 0).single() {
            Some(dt) if self.last_used > 0 => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            _ => "-".to_string(),
        }
    }

    /// Apply an edit in place, leaving id, usage and language untouched
    pub fn apply(&mut self, edit: &SnippetEdit) {
        self.title.clone_from(&edit.title);
        self.description.clone_from(&edit.description);
        self.keywords.clone_from(&edit.keywords);
        self.code.clone_from(&edit.code);
    }
}

/// The editable fields of a snippet
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnippetEdit {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub code: String,
}

impl SnippetEdit {
    /// Build an edit from raw buffer contents.
    ///
    /// Title, description and keywords lose surrounding whitespace; the code
    /// is kept byte for byte.
    #[must_use]
    pub fn trimmed(title: &str, description: &str, keywords: &str, code: String) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            keywords: keywords.trim().to_string(),
            code,
        }
    }
}

impl From<&Snippet> for SnippetEdit {
    fn from(snippet: &Snippet) -> Self {
        Self {
            title: snippet.title.clone(),
            description: snippet.description.clone(),
            keywords: snippet.keywords.clone(),
            code: snippet.code.clone(),
        }
    }
}

/// A snippet about to be inserted by the add flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippet {
    pub title: String,
    pub description: String,
    pub code: String,
    pub keywords: String,
    pub language: Option<LanguageId>,
}

/// A language together with how many snippets use it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub id: LanguageId,
    pub name: String,
    pub description: String,
    pub formatters: Vec<String>,
    pub snippet_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet() -> Snippet {
        Snippet {
            id: SnippetId(1),
            title: "t".into(),
            description: "d".into(),
            code: "c".into(),
            keywords: "k".into(),
            usage_count: 0,
            last_used: 0,
            language: String::new(),
            formatters: String::new(),
        }
    }

    #[test]
    fn test_labels_fall_back_to_dash() {
        let s = snippet();
        assert_eq!(s.language_label(), "-");
        assert_eq!(s.formatters_label(), "-");
        assert_eq!(s.last_used_label(), "-");
    }

    #[test]
    fn test_ids_honor_width_flags() {
        assert_eq!(format!("{:>4}|", SnippetId(7)), "   7|");
        assert_eq!(format!("{:<3}|", LanguageId(12)), "12 |");
    }

    #[test]
    fn test_language_label_is_uppercase() {
        let mut s = snippet();
        s.language = "bash".into();
        assert_eq!(s.language_label(), "BASH");
    }

    #[test]
    fn test_trimmed_keeps_code_verbatim() {
        let edit = SnippetEdit::trimmed("  Foo  ", "\tbar\n", " k1, k2 ", "  x  \n".into());
        assert_eq!(edit.title, "Foo");
        assert_eq!(edit.description, "bar");
        assert_eq!(edit.keywords, "k1, k2");
        assert_eq!(edit.code, "  x  \n");
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut s = snippet();
        s.usage_count = 4;
        let edit = SnippetEdit::trimmed("new", "desc", "kw", "code".into());
        s.apply(&edit);
        assert_eq!(s.id, SnippetId(1));
        assert_eq!(s.usage_count, 4);
        assert_eq!(s.title, "new");
        assert_eq!(s.code, "code");
    }
}
