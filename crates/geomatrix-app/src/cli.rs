//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "geomatrix",
    version,
    about = "Replay a GeoMatrix command script against the saved drawing"
)]
pub struct Cli {
    /// Newline-delimited JSON commands; reads stdin when omitted or `-`.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Session configuration as JSON.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the drawing (default: per-user data directory).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Preferences file (default: per-user config directory).
    #[arg(long = "prefs", value_name = "FILE")]
    pub prefs: Option<PathBuf>,
}
