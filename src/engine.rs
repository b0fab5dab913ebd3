//! Engine: runs one check-execute-log-notify cycle

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::csv_source;
use crate::io::HttpClient;
use crate::notifier::{Alert, Notifier};
use crate::probe::HttpProbe;
use crate::project_log::{append_summary_line, ProjectLogger};
use crate::retention;

/// Aggregate result of one cycle, rendered as one summary-log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub timestamp: DateTime<Utc>,
    pub total_checked: u32,
    pub total_alerting: u32,
}

impl CycleSummary {
    pub fn render(&self) -> String {
        format!(
            "{} | {} analysed projects | {} projects in alert",
            self.timestamp.to_rfc3339(),
            self.total_checked,
            self.total_alerting
        )
    }
}

/// Drives one cycle: load records, probe each, log, notify on failure,
/// write the summary, sweep old logs
pub struct Engine {
    probe: HttpProbe,
    notifier: Arc<dyn Notifier>,
    project_log: ProjectLogger,
    requests_csv: PathBuf,
    summary_log: PathBuf,
    logs_dir: PathBuf,
    retention_days: u64,
}

impl Engine {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            probe: HttpProbe::new(http),
            notifier,
            project_log: ProjectLogger::new(&config.logs_dir),
            requests_csv: config.requests_csv.clone(),
            summary_log: config.summary_log.clone(),
            logs_dir: config.logs_dir.clone(),
            retention_days: config.retention_days,
        }
    }

    /// Run one cycle. A record-loading failure aborts the whole cycle;
    /// everything after that point is contained per record.
    pub async fn run_cycle(&self) -> crate::Result<CycleSummary> {
        tracing::info!("Starting cycle");
        let records = csv_source::load_records(&self.requests_csv)?;

        let mut total_checked = 0u32;
        let mut total_alerting = 0u32;

        for record in &records {
            let outcome = self.probe.check(record).await;
            total_checked += 1;
            if !outcome.passed {
                total_alerting += 1;
            }

            if let Err(e) = self.project_log.append(record, &outcome) {
                tracing::warn!("Cannot write log for '{}': {}", record.project_name, e);
            }

            if !outcome.passed && !record.notify_emails.is_empty() {
                let alert = Alert::from_outcome(record, &outcome);
                if let Err(e) = self.notifier.notify(&alert, &record.notify_emails).await {
                    tracing::warn!(
                        "Notification for '{}' failed: {}",
                        record.project_name,
                        e
                    );
                    if let Err(e) = self.project_log.append_diagnostic(
                        &record.project_name,
                        Utc::now(),
                        &format!("Notification failed: {}", e),
                    ) {
                        tracing::warn!(
                            "Cannot write diagnostic for '{}': {}",
                            record.project_name,
                            e
                        );
                    }
                }
            }
        }

        let summary = CycleSummary {
            timestamp: Utc::now(),
            total_checked,
            total_alerting,
        };
        append_summary_line(&self.summary_log, &summary.render())?;

        let deleted = retention::sweep_old_logs(&self.logs_dir, self.retention_days);
        if deleted > 0 {
            tracing::info!("Swept {} old log file(s)", deleted);
        }

        tracing::info!(
            "Cycle complete: {} checked, {} alerting",
            summary.total_checked,
            summary.total_alerting
        );
        Ok(summary)
    }
}
