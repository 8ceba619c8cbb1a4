//! GeoMatrix application shell.

mod app;
mod cli;

pub use app::{AppConfig, AppError, Summary, replay, run, summarize};
pub use cli::Cli;
