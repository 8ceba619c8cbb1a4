//! Headless front end: replays a command script against a session.
//!
//! Scripts hold one JSON [`Command`] per line. Blank lines and lines starting
//! with `#` are skipped.

use crate::cli::Cli;
use geomatrix_core::{
    Command, FileStorage, PreferenceStore, Preferences, Session, SessionConfig, StorageError,
};
use kurbo::Point;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Application configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub session: SessionConfig,
    /// Where the drawing lives; the per-user data directory when unset.
    pub data_dir: Option<PathBuf>,
    /// Preferences file; the per-user config directory when unset.
    pub preferences_path: Option<PathBuf>,
    /// Command script; stdin when unset.
    pub script: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve parsed arguments, reading the session config file if given.
    pub fn from_cli(cli: Cli) -> Result<Self, AppError> {
        let session = match &cli.config {
            Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
            None => SessionConfig::default(),
        };
        Ok(Self {
            session,
            data_dir: cli.data_dir,
            preferences_path: cli.prefs,
            script: cli.script.filter(|path| path.as_os_str() != "-"),
        })
    }
}

/// State after a replay, for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub commands: usize,
    pub skipped: usize,
    pub strokes: usize,
    pub points: usize,
    pub cursor: Point,
    pub history_len: usize,
    pub history_index: usize,
    pub redoable: usize,
    /// Document mutations seen during the replay.
    pub changes: usize,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "commands: {} ({} skipped)", self.commands, self.skipped)?;
        writeln!(
            f,
            "strokes:  {} ({} points, {} redoable, {} changes)",
            self.strokes, self.points, self.redoable, self.changes
        )?;
        write!(
            f,
            "cursor:   ({}, {}) at history {}/{}",
            self.cursor.x,
            self.cursor.y,
            self.history_index + 1,
            self.history_len
        )
    }
}

/// Open the session, replay the script, save and report.
pub fn run(config: AppConfig) -> Result<Summary, AppError> {
    let storage = match &config.data_dir {
        Some(dir) => FileStorage::new(dir.clone())?,
        None => FileStorage::default_location()?,
    };
    log::info!("Storing drawings in {}", storage.base_path().display());

    let preferences_path = config
        .preferences_path
        .clone()
        .or_else(PreferenceStore::default_path);
    let preferences = match preferences_path {
        Some(path) => PreferenceStore::open(path),
        None => {
            log::warn!("No config directory, preferences will not persist");
            PreferenceStore::in_memory(Preferences::default())
        }
    };

    let mut session = Session::new(config.session, Arc::new(storage), preferences)?;
    let changes = session.subscribe();

    let reader: Box<dyn BufRead> = match &config.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let (commands, skipped) = replay(&mut session, reader)?;

    // End of input is the suspension point.
    session.suspend();
    session.sync();

    Ok(Summary {
        changes: changes.try_iter().count(),
        ..summarize(&session, commands, skipped)
    })
}

/// Dispatch every command in `reader`, ticking the autosave clock between
/// them. Returns how many commands ran and how many lines were unreadable.
pub fn replay(
    session: &mut Session,
    reader: impl BufRead,
) -> Result<(usize, usize), AppError> {
    let mut commands = 0;
    let mut skipped = 0;

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let now = Instant::now();
        match serde_json::from_str::<Command>(line) {
            Ok(command) => {
                log::debug!("{}: {:?}", number + 1, command);
                session.dispatch(command, now);
                commands += 1;
            }
            Err(e) => {
                log::warn!("Skipping line {}: {}", number + 1, e);
                skipped += 1;
            }
        }
        session.tick(now);
    }

    Ok((commands, skipped))
}

pub fn summarize(session: &Session, commands: usize, skipped: usize) -> Summary {
    let document = session.document();
    Summary {
        commands,
        skipped,
        strokes: document.len(),
        points: document.strokes().iter().map(|s| s.len()).sum(),
        cursor: session.cursor().location(),
        history_len: session.cursor().history().len(),
        history_index: session.cursor().index(),
        redoable: session.undone().len(),
        changes: 0,
    }
}
