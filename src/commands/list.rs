//! List command - print snippets without the TUI

use crate::db::Database;
use crate::filter::filter;
use crate::model::Snippet;
use crate::ui::output::OutputWriter;
use crate::ZenoError;

type Result<T> = std::result::Result<T, ZenoError>;

/// Execute the list command
///
/// Query words are matched the same way as in the browser.
///
/// # Errors
///
/// Returns an error if the snippets cannot be loaded.
pub fn execute(db: &Database, query: &[String], output: &dyn OutputWriter) -> Result<()> {
    let snippets = db.load_all()?;
    let query = query.join(" ");
    let matched = filter(&snippets, &query);

    if matched.is_empty() {
        output.info("No snippets found.");
        return Ok(());
    }

    for snippet in &matched {
        output.write(&snippet_row(snippet));
    }
    output.info(&format!("{} of {} snippet(s)", matched.len(), snippets.len()));
    Ok(())
}

/// One listing line: id, title, language and hit count
#[must_use]
pub fn snippet_row(snippet: &Snippet) -> String {
    format!(
        "{:>4}  {:<40}  {:<10}  {:>4}",
        snippet.id,
        snippet.title,
        snippet.language_label(),
        snippet.usage_count
    )
}
