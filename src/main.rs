//! Watchpost CLI
//!
//! Command-line interface for the endpoint monitoring and notification
//! service.

use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use watchpost::{load_config, Config};

#[derive(Parser)]
#[command(name = "watchpost")]
#[command(about = "HTTP endpoint monitoring and notification service")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, once={}, log_level={:?}",
        args.config,
        args.once,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    config.resolve_secrets()?;

    if args.once {
        let summary = watchpost::run_once(config).await?;
        tracing::info!(
            "{} checked, {} alerting",
            summary.total_checked,
            summary.total_alerting
        );
        return Ok(());
    }

    watchpost::run(config).await?;
    Ok(())
}
