//! Add command - create a snippet through interactive prompts

use crate::db::Database;
use crate::language::{picker_label, rank_languages};
use crate::model::{NewSnippet, SnippetId};
use crate::ui::clipboard::TextSource;
use crate::ui::input::UserInput;
use crate::ui::output::OutputWriter;
use crate::ZenoError;
use tracing::info;

type Result<T> = std::result::Result<T, ZenoError>;

/// Words kept lowercase by [`title_case`] unless first or last
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "in", "nor", "of", "on", "or", "per", "the",
    "to", "vs", "with", "from",
];

const CODE_SOURCES: [&str; 2] = ["Clipboard", "Editor"];
const NO_LANGUAGE: &str = "(none)";

/// Execute the add command
///
/// Returns the new snippet's id, or `None` when a prompt was cancelled.
///
/// # Errors
///
/// Returns an error if a prompt fails, the code is empty or the snippet
/// cannot be stored.
pub fn execute(
    db: &Database,
    input: &dyn UserInput,
    clipboard: &mut dyn TextSource,
    output: &dyn OutputWriter,
    use_title_case: bool,
) -> Result<Option<SnippetId>> {
    let Some(title) = input.prompt_text("Title", None, false)? else {
        return cancelled(output);
    };
    let title = if use_title_case {
        title_case(&title)
    } else {
        title.trim().to_string()
    };
    if title.is_empty() {
        return Err(ZenoError::InvalidInput("Title must not be empty".into()));
    }

    let sources: Vec<String> = CODE_SOURCES.iter().map(|s| (*s).to_string()).collect();
    let code = match input.prompt_select("Code input", &sources, Some(0))? {
        Some(0) => clipboard.read_text()?,
        Some(_) => match input.prompt_editor("")? {
            Some(code) => code,
            None => return cancelled(output),
        },
        None => return cancelled(output),
    };
    if code.trim().is_empty() {
        return Err(ZenoError::InvalidInput("Code must not be empty".into()));
    }

    let languages = db.list_languages()?;
    let ranked = rank_languages(&languages, &title);
    let mut labels: Vec<String> = ranked.iter().map(|l| picker_label(l)).collect();
    labels.push(NO_LANGUAGE.to_string());
    let Some(choice) = input.prompt_select("Language", &labels, Some(0))? else {
        return cancelled(output);
    };
    let language = ranked.get(choice).copied();

    let Some(description) = input.prompt_text("Description", None, true)? else {
        return cancelled(output);
    };
    let Some(keywords) = input.prompt_text("Keywords (comma separated)", None, true)? else {
        return cancelled(output);
    };
    let keywords = with_language_keyword(&keywords, language.map(|l| l.name.as_str()));

    let id = db.insert(&NewSnippet {
        title: title.clone(),
        description: description.trim().to_string(),
        code,
        keywords,
        language: language.map(|l| l.id),
    })?;
    db.flush()?;

    info!(id = id.0, "added snippet");
    output.success(&format!("Added snippet {id}: {title}"));
    Ok(Some(id))
}

fn cancelled(output: &dyn OutputWriter) -> Result<Option<SnippetId>> {
    output.info("Add cancelled.");
    Ok(None)
}

/// Normalize a comma-separated keyword list and make sure it names the
/// language
#[must_use]
pub fn with_language_keyword(keywords: &str, language: Option<&str>) -> String {
    let mut list: Vec<&str> = keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .collect();

    if let Some(language) = language
        && !language.is_empty()
        && !list.iter().any(|k| k.eq_ignore_ascii_case(language))
    {
        list.insert(0, language);
    }
    list.join(", ")
}

/// Title-case a snippet title, keeping short connecting words lowercase
///
/// ```
/// use zeno::commands::add::title_case;
///
/// assert_eq!(title_case("dump the app DATABASE"), "Dump the App Database");
/// ```
#[must_use]
pub fn title_case(title: &str) -> String {
    let lower = title.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();
    let last = words.len().saturating_sub(1);

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            if i != 0 && i != last && STOP_WORDS.contains(word) {
                (*word).to_string()
            } else {
                capitalize(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Answer, ScriptedInput, TestDb};
    use crate::ui::clipboard::SinkError;
    use crate::ui::output::{BufferedWriter, MessageLevel};

    struct FixedText(Option<&'static str>);

    impl TextSource for FixedText {
        fn read_text(&mut self) -> std::result::Result<String, SinkError> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| SinkError::Io(std::io::Error::other("no clipboard")))
        }
    }

    #[test]
    fn test_title_case_stop_words() {
        assert_eq!(title_case("copy a file to the server"), "Copy a File to the Server");
        assert_eq!(title_case("the end of the"), "The End of The");
        assert_eq!(title_case("  SPACED   out  "), "Spaced Out");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_language_keyword_prepended_once() {
        assert_eq!(with_language_keyword("loop, files", Some("bash")), "bash, loop, files");
        assert_eq!(with_language_keyword("Bash, loop", Some("bash")), "Bash, loop");
        assert_eq!(with_language_keyword(" , a ,, b ", None), "a, b");
        assert_eq!(with_language_keyword("", Some("sql")), "sql");
    }

    #[test]
    fn test_add_from_clipboard_with_ranked_language() {
        let test_db = TestDb::new();
        let db = test_db.db();
        db.add_language("python", "General purpose scripting", vec![]).unwrap();
        db.add_language("bash", "Bourne again shell", vec!["shfmt".into()]).unwrap();

        let input = ScriptedInput::new([
            Answer::Text("loop over files in bash"),
            Answer::Select(0),
            Answer::Select(0),
            Answer::Text("Iterate with a for loop"),
            Answer::Text("loop, files"),
        ]);
        let output = BufferedWriter::new();
        let mut clipboard = FixedText(Some("for f in *; do echo $f; done"));

        let id = execute(db, &input, &mut clipboard, &output, false).unwrap().unwrap();

        // bash matches the title, so it is offered first
        assert!(input.offered()[0].starts_with("BASH"));
        assert_eq!(input.offered().last().map(String::as_str), Some(NO_LANGUAGE));

        let stored = db.get(id).unwrap().unwrap();
        assert_eq!(stored.title, "loop over files in bash");
        assert_eq!(stored.code, "for f in *; do echo $f; done");
        assert_eq!(stored.language, "bash");
        assert_eq!(stored.keywords, "bash, loop, files");
        assert_eq!(stored.usage_count, 0);
        assert!(stored.last_used > 0);
        assert_eq!(output.of_level(MessageLevel::Success).len(), 1);
    }

    #[test]
    fn test_add_from_editor_without_language() {
        let test_db = TestDb::new();
        let db = test_db.db();

        let input = ScriptedInput::new([
            Answer::Text("list open ports"),
            Answer::Select(1),
            Answer::Editor("ss -tulpn\n"),
            Answer::Select(0),
            Answer::Text(""),
            Answer::Text("network"),
        ]);
        let output = BufferedWriter::new();
        let mut clipboard = FixedText(None);

        let id = execute(db, &input, &mut clipboard, &output, true).unwrap().unwrap();
        let stored = db.get(id).unwrap().unwrap();
        assert_eq!(stored.title, "List Open Ports");
        assert_eq!(stored.code, "ss -tulpn\n");
        assert!(stored.language.is_empty());
        assert_eq!(stored.keywords, "network");
    }

    #[test]
    fn test_cancel_stores_nothing() {
        let test_db = TestDb::new();
        let input = ScriptedInput::new([Answer::Text("anything"), Answer::Cancel]);
        let output = BufferedWriter::new();

        let result = execute(test_db.db(), &input, &mut FixedText(None), &output, false).unwrap();
        assert!(result.is_none());
        assert_eq!(test_db.db().count(), 0);
        assert_eq!(output.of_level(MessageLevel::Info), vec!["Add cancelled."]);
    }

    #[test]
    fn test_clipboard_failure_is_an_error() {
        let test_db = TestDb::new();
        let input = ScriptedInput::new([Answer::Text("anything"), Answer::Select(0)]);
        let output = BufferedWriter::new();

        let result = execute(test_db.db(), &input, &mut FixedText(None), &output, false);
        assert!(matches!(result, Err(ZenoError::SinkError(_))));
        assert_eq!(test_db.db().count(), 0);
    }

    #[test]
    fn test_blank_code_is_rejected() {
        let test_db = TestDb::new();
        let input = ScriptedInput::new([Answer::Text("anything"), Answer::Select(0)]);
        let output = BufferedWriter::new();

        let result = execute(test_db.db(), &input, &mut FixedText(Some("  \n")), &output, false);
        assert!(matches!(result, Err(ZenoError::InvalidInput(_))));
    }
}
