//! Main application entry point.

use clap::Parser;
use geomatrix_app::{AppConfig, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::init();
    log::info!("Starting GeoMatrix");

    match AppConfig::from_cli(cli).and_then(geomatrix_app::run) {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("geomatrix: {}", e);
            ExitCode::FAILURE
        }
    }
}
