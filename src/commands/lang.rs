//! Lang command - manage the languages snippets can be filed under

use crate::cli::LangCommands;
use crate::db::Database;
use crate::language::picker_label;
use crate::ui::output::OutputWriter;
use crate::ZenoError;

type Result<T> = std::result::Result<T, ZenoError>;

/// Execute a lang subcommand
///
/// # Errors
///
/// Returns an error if the name is empty or taken, the language is unknown
/// or still in use, or the database fails.
pub fn execute(db: &Database, command: LangCommands, output: &dyn OutputWriter) -> Result<()> {
    match command {
        LangCommands::Add {
            name,
            description,
            formatters,
        } => {
            let id = db.add_language(&name, &description, formatters)?;
            db.flush()?;
            output.success(&format!("Added language {} (id={id})", name.trim()));
        }
        LangCommands::List => {
            let languages = db.list_languages()?;
            if languages.is_empty() {
                output.info("No languages defined. Add one with `zeno lang add <name>`.");
            }
            for language in &languages {
                let mut row = picker_label(language);
                if !language.formatters.is_empty() {
                    row.push_str("  ");
                    row.push_str(&language.formatters.join(","));
                }
                output.write(&row);
            }
        }
        LangCommands::Remove { name } => {
            db.remove_language(&name)?;
            db.flush()?;
            output.success(&format!("Removed language {name}"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::model::NewSnippet;
    use crate::testing::TestDb;
    use crate::ui::output::{BufferedWriter, MessageLevel};

    fn add(name: &str) -> LangCommands {
        LangCommands::Add {
            name: name.into(),
            description: format!("{name} language"),
            formatters: vec![],
        }
    }

    #[test]
    fn test_add_then_list() {
        let test_db = TestDb::new();
        let output = BufferedWriter::new();

        execute(test_db.db(), add("sql"), &output).unwrap();
        execute(
            test_db.db(),
            LangCommands::Add {
                name: "bash".into(),
                description: String::new(),
                formatters: vec!["shfmt".into()],
            },
            &output,
        )
        .unwrap();
        execute(test_db.db(), LangCommands::List, &output).unwrap();

        let rows = output.of_level(MessageLevel::Normal);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("BASH"));
        assert!(rows[0].ends_with("shfmt"));
        assert!(rows[1].starts_with("SQL"));
        assert_eq!(output.of_level(MessageLevel::Success).len(), 2);
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let test_db = TestDb::new();
        let output = BufferedWriter::new();

        execute(test_db.db(), add("rust"), &output).unwrap();
        let result = execute(test_db.db(), add("Rust"), &output);
        assert!(matches!(result, Err(ZenoError::DbError(DbError::InvalidInput(_)))));
    }

    #[test]
    fn test_remove_refuses_language_in_use() {
        let test_db = TestDb::new();
        let db = test_db.db();
        let output = BufferedWriter::new();

        let id = db.add_language("awk", "", vec![]).unwrap();
        db.insert(&NewSnippet {
            title: "sum a column".into(),
            description: String::new(),
            code: "awk '{s+=$1} END {print s}'".into(),
            keywords: "awk".into(),
            language: Some(id),
        })
        .unwrap();

        let result = execute(db, LangCommands::Remove { name: "awk".into() }, &output);
        assert!(matches!(
            result,
            Err(ZenoError::DbError(DbError::LanguageInUse { count: 1, .. }))
        ));
        assert!(db.find_language("awk").unwrap().is_some());
    }

    #[test]
    fn test_remove_unused_language() {
        let test_db = TestDb::new();
        let output = BufferedWriter::new();

        execute(test_db.db(), add("perl"), &output).unwrap();
        execute(test_db.db(), LangCommands::Remove { name: "PERL".into() }, &output).unwrap();
        assert!(test_db.db().list_languages().unwrap().is_empty());
    }
}
