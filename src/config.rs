//! Configuration types for the watchpost service

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// CSV file listing the endpoint checks, re-read every cycle
    #[serde(default = "default_requests_csv")]
    pub requests_csv: PathBuf,
    /// Directory holding the per-project result logs
    #[serde(default = "default_logs_dir")]
    pub logs_dir: PathBuf,
    /// File receiving one summary line per cycle
    #[serde(default = "default_summary_log")]
    pub summary_log: PathBuf,
    /// Log files older than this many days are deleted each cycle
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,
    /// Delay between the end of one cycle and the start of the next
    #[serde(default = "default_check_interval")]
    pub check_interval_seconds: u64,
    #[serde(default)]
    pub smtp: SmtpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            requests_csv: default_requests_csv(),
            logs_dir: default_logs_dir(),
            summary_log: default_summary_log(),
            retention_days: default_retention_days(),
            check_interval_seconds: default_check_interval(),
            smtp: SmtpConfig::default(),
        }
    }
}

/// SMTP transport settings for alert emails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_smtp_from")]
    pub from: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from: default_smtp_from(),
        }
    }
}

fn default_requests_csv() -> PathBuf {
    PathBuf::from("requests.csv")
}

fn default_logs_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_summary_log() -> PathBuf {
    PathBuf::from("resume.log")
}

fn default_retention_days() -> u64 {
    30
}

fn default_check_interval() -> u64 {
    30 * 60
}

fn default_smtp_host() -> String {
    "smtp.example.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_from() -> String {
    "sender@example.com".to_string()
}

impl Config {
    /// Override SMTP settings from the environment so credentials can stay
    /// out of the on-disk configuration file. Recognized variables:
    /// `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS`, `SMTP_FROM`.
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        if let Ok(host) = std::env::var("SMTP_HOST") {
            self.smtp.host = host;
        }
        if let Ok(port) = std::env::var("SMTP_PORT") {
            self.smtp.port = port.parse().map_err(|_| {
                crate::WatchpostError::Config(format!("Invalid SMTP_PORT value: {port:?}"))
            })?;
        }
        if let Ok(username) = std::env::var("SMTP_USER") {
            self.smtp.username = username;
        }
        if let Ok(password) = std::env::var("SMTP_PASS") {
            self.smtp.password = password;
        }
        if let Ok(from) = std::env::var("SMTP_FROM") {
            self.smtp.from = from;
        }
        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::WatchpostError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
