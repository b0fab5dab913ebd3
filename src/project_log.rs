//! Per-project append-only result logs
//!
//! One file per project under the logs directory, one line per check
//! outcome. The line grammar is fixed; downstream tooling parses it:
//!
//! `<timestamp> | client=<client> | endpoint=<endpoint> | expected=<n> | actual=<n or ERROR> | status=<OK|ALERT> | detail=<error or empty>`

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::probe::CheckOutcome;
use crate::record::EndpointCheckRecord;

/// Replace anything that is not alphanumeric with `_` so a project name is
/// always a safe file stem
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Appends structured result lines to per-project log files
pub struct ProjectLogger {
    logs_dir: PathBuf,
}

impl ProjectLogger {
    pub fn new(logs_dir: impl Into<PathBuf>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
        }
    }

    pub fn path_for(&self, project_name: &str) -> PathBuf {
        self.logs_dir
            .join(format!("{}.log", sanitize_file_stem(project_name)))
    }

    /// Append one outcome line to the record's project log
    pub fn append(
        &self,
        record: &EndpointCheckRecord,
        outcome: &CheckOutcome,
    ) -> crate::Result<()> {
        let line = format!(
            "{} | client={} | endpoint={} | expected={} | actual={} | status={} | detail={}",
            outcome.timestamp.to_rfc3339(),
            record.client,
            record.endpoint,
            record.expected_status,
            outcome.actual,
            if outcome.passed { "OK" } else { "ALERT" },
            outcome.error.as_deref().unwrap_or(""),
        );
        self.append_line(&record.project_name, &line)
    }

    /// Append a free-form diagnostic line (e.g. a failed notification
    /// attempt) to a project log
    pub fn append_diagnostic(
        &self,
        project_name: &str,
        timestamp: DateTime<Utc>,
        message: &str,
    ) -> crate::Result<()> {
        let line = format!("{} | {}", timestamp.to_rfc3339(), message);
        self.append_line(project_name, &line)
    }

    fn append_line(&self, project_name: &str, line: &str) -> crate::Result<()> {
        std::fs::create_dir_all(&self.logs_dir)?;
        let path = self.path_for(project_name);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        // One write call per line so a line is never interleaved
        file.write_all(format!("{}\n", line).as_bytes())?;
        Ok(())
    }
}

/// Append one line to the shared summary log, creating it if absent
pub fn append_summary_line(path: &Path, line: &str) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(format!("{}\n", line).as_bytes())?;
    Ok(())
}
