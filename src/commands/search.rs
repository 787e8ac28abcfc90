//! Search command - the interactive snippet browser

use crate::config::ZenoConfig;
use crate::db::Database;
use crate::ui::clipboard::{ClipboardSink, OutputSink, StdoutSink};
use crate::ui::output::OutputWriter;
use crate::ui::ratatui_adapter::{
    Outcome, SearchRunner, Session, SessionSettings, default_highlighter,
};
use crate::ui::UiError;
use crate::ZenoError;

type Result<T> = std::result::Result<T, ZenoError>;

/// Execute the search command
///
/// The chosen snippet goes to the clipboard, or to stdout with `print`.
/// An empty database is reported and is not an error.
///
/// # Errors
///
/// Returns an error if the snippets cannot be loaded, the terminal fails
/// or printed output cannot be written.
pub fn execute(
    db: &Database,
    config: &ZenoConfig,
    print: bool,
    output: &dyn OutputWriter,
) -> Result<()> {
    if db.count() == 0 {
        output.write(&UiError::Empty.to_string());
        return Ok(());
    }

    let settings = SessionSettings {
        list_width_percent: config.list_width_percent(),
    };
    let mut runner = SearchRunner::new(
        default_highlighter(&config.highlight_theme),
        config.preview_max_lines,
    );

    if print {
        let mut sink = StdoutSink::new();
        let outcome = browse(db, &mut sink, settings, &mut runner, output)?;
        if matches!(outcome, Some(Outcome::Copied(_))) {
            sink.flush_to_stdout()?;
        }
    } else {
        let mut sink = ClipboardSink::new();
        if let Some(Outcome::Copied(id)) = browse(db, &mut sink, settings, &mut runner, output)? {
            if let Err(e) = sink.hand_off() {
                tracing::warn!(error = %e, "clipboard hand-off failed");
                output.warning(&format!("The clipboard may be cleared when zeno exits: {e}"));
            }
            output.success(&format!("Copied snippet {id} to the clipboard"));
        }
    }
    Ok(())
}

/// Run one session; `None` when there was nothing to browse
fn browse<K: OutputSink>(
    db: &Database,
    sink: K,
    settings: SessionSettings,
    runner: &mut SearchRunner,
    output: &dyn OutputWriter,
) -> Result<Option<Outcome>> {
    let mut session = match Session::start(db, sink, settings) {
        Ok(session) => session,
        Err(UiError::Empty) => {
            output.write(&UiError::Empty.to_string());
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let outcome = runner.run(&mut session)?;
    db.flush()?;
    Ok(Some(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDb;
    use crate::ui::output::{BufferedWriter, MessageLevel};

    #[test]
    fn test_empty_database_is_reported_without_a_terminal() {
        let test_db = TestDb::new();
        let output = BufferedWriter::new();

        execute(test_db.db(), &ZenoConfig::default(), false, &output).unwrap();
        assert_eq!(
            output.of_level(MessageLevel::Normal),
            vec!["No snippets in database."]
        );
    }
}
