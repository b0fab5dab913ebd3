//! Watchpost - HTTP endpoint monitoring and notification service
//!
//! Re-reads a CSV of endpoint checks every cycle, probes each endpoint,
//! appends results to per-project logs, and emails recipients on failure.

pub mod config;
pub mod csv_source;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod probe;
pub mod project_log;
pub mod record;
pub mod retention;
pub mod smtp;

pub use config::{load_config, Config};
pub use error::{Result, WatchpostError};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::engine::{CycleSummary, Engine};
use crate::io::ReqwestHttpClient;
use crate::notifier::Notifier;
use crate::smtp::SmtpNotifier;

fn build_engine(config: &Config) -> Result<Engine> {
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new()?);
    let notifier: Arc<dyn Notifier> = Arc::new(SmtpNotifier::new(&config.smtp)?);
    Ok(Engine::new(config, http, notifier))
}

/// Run a single cycle and return its summary
pub async fn run_once(config: Config) -> Result<CycleSummary> {
    build_engine(&config)?.run_cycle().await
}

/// Run the watchpost scheduler with the given configuration.
///
/// Executes one cycle immediately, then repeats on a fixed delay: the
/// interval starts after a cycle completes, so cycles never overlap. A
/// failed cycle is reported and the next tick proceeds. Returns after
/// ctrl-c.
pub async fn run(config: Config) -> Result<()> {
    let engine = build_engine(&config)?;
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl-c");
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    let interval = Duration::from_secs(config.check_interval_seconds);
    tracing::info!(
        "Watchpost started, checking every {} seconds",
        config.check_interval_seconds
    );

    loop {
        if let Err(e) = engine.run_cycle().await {
            tracing::error!("Cycle failed: {}", e);
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = cancel.cancelled() => {
                tracing::info!("Watchpost stopped");
                break;
            }
        }
    }

    Ok(())
}
