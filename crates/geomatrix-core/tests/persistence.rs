use geomatrix_core::{
    CanvasMode, Command, FileStorage, PreferenceStore, Preferences, Session, SessionConfig, Surface,
};
use std::fs;
use std::sync::Arc;
use std::time::Instant;
use tempfile::tempdir;

fn open(dir: &std::path::Path) -> Session {
    let storage = Arc::new(FileStorage::new(dir.to_path_buf()).unwrap());
    let config = SessionConfig {
        canvas_mode: CanvasMode::Cursor,
        ..SessionConfig::default()
    };
    let preferences = PreferenceStore::in_memory(Preferences::default());
    Session::new(config, storage, preferences).unwrap()
}

fn draw(session: &mut Session) {
    let begin = Command::Begin {
        surface: Surface::Canvas,
        x: 0.0,
        y: 0.0,
    };
    for command in [
        begin,
        Command::Move { x: 5.0, y: 0.0 },
        Command::Move { x: 5.0, y: 8.0 },
        Command::End,
    ] {
        session.dispatch(command, Instant::now());
    }
}

#[test]
fn missing_file_starts_empty_and_saves_round_trip() {
    let dir = tempdir().unwrap();

    let mut session = open(dir.path());
    assert!(session.document().is_empty());

    draw(&mut session);
    assert_eq!(session.document().len(), 1);
    assert!(session.suspend());
    session.sync();
    let drawn = session.document().snapshot();
    drop(session);

    let reopened = open(dir.path());
    assert_eq!(reopened.document().strokes(), &drawn[..]);
}

#[test]
fn empty_session_does_not_clobber_saved_drawing() {
    let dir = tempdir().unwrap();

    let mut session = open(dir.path());
    draw(&mut session);
    session.suspend();
    drop(session);

    // A storage that cannot be read yields an empty session; suspending it
    // must not overwrite the file with nothing.
    let path = FileStorage::new(dir.path().to_path_buf())
        .unwrap()
        .document_path("Document");
    let saved = fs::read_to_string(&path).unwrap();
    fs::write(&path, "garbage").unwrap();

    let mut session = open(dir.path());
    assert!(session.document().is_empty());
    assert!(!session.suspend());
    drop(session);

    assert_eq!(fs::read_to_string(&path).unwrap(), "garbage");
    fs::write(&path, saved).unwrap();
    assert_eq!(open(dir.path()).document().len(), 1);
}

#[test]
fn dropping_session_flushes_suspend_save() {
    let dir = tempdir().unwrap();

    let mut session = open(dir.path());
    draw(&mut session);
    draw(&mut session);
    session.dispatch(Command::Save, Instant::now());
    drop(session);

    assert_eq!(open(dir.path()).document().len(), 2);
}
