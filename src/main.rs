#![forbid(unsafe_code)]

mod app;
mod config;
mod constants;
mod coordinator;
mod error;
mod gui;
mod hotkeys;
#[cfg(test)]
mod testing;
mod tray;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use app::StartupOptions;
use config::SettingsStore;

#[derive(Debug, Parser)]
#[command(name = "crosshair-overlay", version, about = "Always-on-top crosshair overlay")]
struct Cli {
    /// Settings file to use instead of the per-user default
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides LOG_LEVEL
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Start with the crosshair hidden
    #[arg(long)]
    hidden: bool,
}

fn parse_level(raw: &str) -> TraceLevel {
    match raw.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = parse_level(
        &cli.log_level
            .clone()
            .or_else(|| std::env::var("LOG_LEVEL").ok())
            .unwrap_or_else(|| "info".to_string()),
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let options = StartupOptions {
        settings_path: cli.config.unwrap_or_else(SettingsStore::default_path),
        start_hidden: cli.hidden,
        ..StartupOptions::default()
    };
    info!(path = %options.settings_path.display(), hidden = options.start_hidden, "Starting crosshair overlay");

    gui::run_gui(options)
}
