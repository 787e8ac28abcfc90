//! Query filtering for the snippet list
//!
//! A query is split on whitespace into tokens. A snippet matches when every
//! token occurs, ignoring case, somewhere in its title, description,
//! keywords or code. Matching never reorders: the result keeps the order of
//! the input, which is the store's usage ordering.
//!
//! The searchable fields are joined with U+001F (unit separator) so a token
//! can never match across the boundary between two fields.
//!
//! # Examples
//!
//! ```
//! use zeno::filter::tokens;
//!
//! assert_eq!(tokens("  DB   connect "), vec!["db", "connect"]);
//! assert!(tokens("   ").is_empty());
//! ```

use crate::model::Snippet;

const FIELD_SEPARATOR: char = '\u{1f}';

/// Split a query into lowercase, non-empty tokens
///
/// Control characters are dropped, so no token can contain the field
/// separator.
#[must_use]
pub fn tokens(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !c.is_control())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|token| !token.is_empty())
        .collect()
}

/// Lowercased concatenation of all searchable fields
#[must_use]
pub fn haystack(snippet: &Snippet) -> String {
    let mut text = String::with_capacity(
        snippet.title.len()
            + snippet.description.len()
            + snippet.keywords.len()
            + snippet.code.len()
            + 3,
    );
    text.push_str(&snippet.title);
    text.push(FIELD_SEPARATOR);
    text.push_str(&snippet.description);
    text.push(FIELD_SEPARATOR);
    text.push_str(&snippet.keywords);
    text.push(FIELD_SEPARATOR);
    text.push_str(&snippet.code);
    text.to_lowercase()
}

/// Whether every token occurs in the snippet's searchable text
#[must_use]
pub fn matches(snippet: &Snippet, tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return true;
    }
    let text = haystack(snippet);
    tokens.iter().all(|token| text.contains(token.as_str()))
}

/// Indices into `snippets` of the entries matching `query`, in input order
#[must_use]
pub fn filter_indices(snippets: &[Snippet], query: &str) -> Vec<usize> {
    let tokens = tokens(query);
    snippets
        .iter()
        .enumerate()
        .filter(|(_, snippet)| matches(snippet, &tokens))
        .map(|(index, _)| index)
        .collect()
}

/// The entries matching `query`, in input order
#[must_use]
pub fn filter<'a>(snippets: &'a [Snippet], query: &str) -> Vec<&'a Snippet> {
    filter_indices(snippets, query)
        .into_iter()
        .map(|index| &snippets[index])
        .collect()
}
