//! Error types for the watchpost service

/// Errors that can occur in the watchpost service
#[derive(Debug, thiserror::Error)]
pub enum WatchpostError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid check record: {0}")]
    Record(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Notifier error: {0}")]
    Notifier(String),
}

/// Result type alias for watchpost operations
pub type Result<T> = std::result::Result<T, WatchpostError>;
