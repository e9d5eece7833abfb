//! Homework bot CLI
//!
//! Command-line entry point for the Practicum review status notifier.

use std::fs::OpenOptions;
use std::path::PathBuf;

use clap::Parser;
use homework_bot::{load_config, Config};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Relays Practicum homework review statuses to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    /// Also append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let (file_layer, _log_guard) = match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(LevelFilter::from_level(args.log_level))
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => tracing::debug!("No .env file found"),
        Err(e) => tracing::warn!("Failed to load .env file: {}", e),
    }

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}, log_file={:?}",
        args.config,
        args.log_level,
        args.log_file
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets();
    tracing::debug!("Effective configuration: {:?}", config);

    homework_bot::run(config).await?;

    Ok(())
}
