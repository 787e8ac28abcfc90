//! Integration tests for zeno
//!
//! These tests drive the browsing session against a real sled database in a
//! temporary directory, the way `zeno search` does, minus the terminal.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend};
use tempfile::TempDir;
use zeno::{
    db::Database,
    model::{NewSnippet, SnippetId},
    ui::{
        OutputSink, SinkError, UiError,
        ratatui_adapter::{
            Outcome, Session, SessionSettings, Theme,
            render::{View, draw},
            state::SessionState,
        },
    },
};

/// Sink that keeps everything written to it
#[derive(Default)]
struct VecSink(Vec<String>);

impl OutputSink for VecSink {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        self.0.push(text.to_string());
        Ok(())
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn type_text<K: OutputSink>(session: &mut Session<&Database, K>, text: &str) {
    for c in text.chars() {
        session.handle_event(&Event::Key(key(KeyCode::Char(c))));
    }
}

/// Database with three snippets and one language
fn setup_test_db(dir: &TempDir) -> (Database, Vec<SnippetId>) {
    let db = Database::open(dir.path().join("db")).unwrap();
    let bash = db.add_language("bash", "Bourne again shell", vec!["shfmt".into()]).unwrap();

    let rows = [
        ("Connect to Postgres", "psql -h localhost -U dev app_db", "postgres, psql, db"),
        ("Archive a directory", "tar -czf out.tar.gz dir/", "tar, gzip"),
        ("Dump database", "pg_dump app > app.sql", "postgres, backup, db"),
    ];
    let ids = rows
        .iter()
        .map(|(title, code, keywords)| {
            db.insert(&NewSnippet {
                title: (*title).into(),
                description: format!("{title} description"),
                code: (*code).into(),
                keywords: (*keywords).into(),
                language: Some(bash),
            })
            .unwrap()
        })
        .collect();
    (db, ids)
}

fn titles<K: OutputSink>(session: &Session<&Database, K>) -> Vec<String> {
    session
        .state()
        .browser()
        .map(|b| b.visible().map(|s| s.title.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn test_empty_database_does_not_start() {
    let dir = TempDir::new().unwrap();
    let db = Database::open(dir.path().join("db")).unwrap();

    let result = Session::start(&db, VecSink::default(), SessionSettings::default());
    assert!(matches!(result, Err(UiError::Empty)));
}

#[test]
fn test_copy_records_usage_and_persists() {
    let dir = TempDir::new().unwrap();
    let (db, ids) = setup_test_db(&dir);

    let mut session = Session::start(&db, VecSink::default(), SessionSettings::default()).unwrap();
    type_text(&mut session, "dump");
    assert_eq!(titles(&session), vec!["Dump database"]);

    let outcome = session.handle_event(&Event::Key(key(KeyCode::Enter)));
    assert_eq!(outcome, Outcome::Copied(ids[2]));
    assert_eq!(session.into_sink().0, vec!["pg_dump app > app.sql".to_string()]);

    drop(db);
    let db = Database::open(dir.path().join("db")).unwrap();
    let all = db.load_all().unwrap();
    // The used snippet now sorts first
    assert_eq!(all[0].id, ids[2]);
    assert_eq!(all[0].usage_count, 1);
    assert_eq!(all[0].language, "bash");
}

#[test]
fn test_confirmed_delete_removes_from_store() {
    let dir = TempDir::new().unwrap();
    let (db, ids) = setup_test_db(&dir);

    let mut session = Session::start(&db, VecSink::default(), SessionSettings::default()).unwrap();
    type_text(&mut session, "tar");
    session.handle_event(&Event::Key(ctrl('d')));
    assert!(matches!(session.state(), SessionState::ConfirmingDelete { .. }));
    session.handle_event(&Event::Key(key(KeyCode::Char('y'))));

    assert!(matches!(session.state(), SessionState::Browsing(_)));
    assert!(titles(&session).is_empty());
    assert_eq!(db.count(), 2);
    assert!(db.get(ids[1]).unwrap().is_none());
}

#[test]
fn test_denied_delete_keeps_store() {
    let dir = TempDir::new().unwrap();
    let (db, _) = setup_test_db(&dir);

    let mut session = Session::start(&db, VecSink::default(), SessionSettings::default()).unwrap();
    session.handle_event(&Event::Key(ctrl('d')));
    session.handle_event(&Event::Key(key(KeyCode::Esc)));

    assert!(matches!(session.state(), SessionState::Browsing(_)));
    assert_eq!(db.count(), 3);
}

#[test]
fn test_edit_is_saved_and_reloaded() {
    let dir = TempDir::new().unwrap();
    let (db, ids) = setup_test_db(&dir);

    let mut session = Session::start(&db, VecSink::default(), SessionSettings::default()).unwrap();
    session.resize(100, 30);
    type_text(&mut session, "archive");
    session.handle_event(&Event::Key(ctrl('e')));

    // Title, then description, keywords and code
    session.handle_event(&Event::Key(key(KeyCode::End)));
    type_text(&mut session, " (gzip)");
    for _ in 0..3 {
        session.handle_event(&Event::Key(key(KeyCode::Tab)));
    }
    session.handle_event(&Event::Key(ctrl('e')));
    type_text(&mut session, " --verbose");
    session.handle_event(&Event::Key(ctrl('s')));

    assert!(matches!(session.state(), SessionState::Browsing(_)));
    assert!(titles(&session).contains(&"Archive a directory (gzip)".to_string()));

    let stored = db.get(ids[1]).unwrap().unwrap();
    assert_eq!(stored.title, "Archive a directory (gzip)");
    assert_eq!(stored.code, "tar -czf out.tar.gz dir/ --verbose");
    assert_eq!(stored.keywords, "tar, gzip");
}

#[test]
fn test_blank_title_is_not_saved() {
    let dir = TempDir::new().unwrap();
    let (db, ids) = setup_test_db(&dir);

    let mut session = Session::start(&db, VecSink::default(), SessionSettings::default()).unwrap();
    type_text(&mut session, "archive");
    session.handle_event(&Event::Key(ctrl('e')));
    session.handle_event(&Event::Key(key(KeyCode::End)));
    for _ in 0.."Archive a directory".len() {
        session.handle_event(&Event::Key(key(KeyCode::Backspace)));
    }
    type_text(&mut session, "   ");
    session.handle_event(&Event::Key(ctrl('s')));

    match session.state() {
        SessionState::Editing(editor) => {
            let status = editor.status.as_deref().unwrap_or_default();
            assert!(status.starts_with("Save failed"), "{status}");
        }
        other => panic!("expected editing, got {}", other.name()),
    }
    assert_eq!(db.get(ids[1]).unwrap().unwrap().title, "Archive a directory");
}

#[test]
fn test_screen_shows_store_contents() {
    let dir = TempDir::new().unwrap();
    let (db, _) = setup_test_db(&dir);

    let mut session = Session::start(&db, VecSink::default(), SessionSettings::default()).unwrap();
    session.resize(100, 30);
    type_text(&mut session, "postgres");

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let view = View {
        state: session.state(),
        notice: session.notice(),
        preview: None,
        geometry: session.geometry(),
        edit_geometry: session.edit_geometry(),
        settings: session.settings(),
    };
    terminal.draw(|frame| draw(frame, &view, &Theme::default())).unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
    }
    assert!(text.contains("Snippets (2/3)"));
    assert!(text.contains("Language: BASH"));
    assert!(text.contains("Formatters: shfmt"));
}
