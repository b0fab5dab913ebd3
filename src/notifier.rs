//! Notifier trait for sending alerts

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::probe::CheckOutcome;
use crate::record::EndpointCheckRecord;

/// An alert raised by one failed check
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub client: String,
    pub project_name: String,
    pub endpoint: String,
    pub expected_status: u16,
    pub actual: String,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    pub fn from_outcome(record: &EndpointCheckRecord, outcome: &CheckOutcome) -> Self {
        let actual = match &outcome.error {
            Some(error) => error.clone(),
            None => outcome.actual.to_string(),
        };
        Self {
            client: record.client.clone(),
            project_name: record.project_name.clone(),
            endpoint: record.endpoint.clone(),
            expected_status: record.expected_status,
            actual,
            timestamp: outcome.timestamp,
        }
    }

    pub fn subject(&self) -> String {
        format!("Unexpected status from {}", self.endpoint)
    }

    pub fn body(&self) -> String {
        format!(
            "Client: {}\nProject: {}\nEndpoint: {}\nExpected status: {}\nActual: {}\nChecked at: {}\n",
            self.client,
            self.project_name,
            self.endpoint,
            self.expected_status,
            self.actual,
            self.timestamp.to_rfc3339(),
        )
    }
}

/// Trait for delivering alerts to a list of recipients
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    async fn notify(&self, alert: &Alert, recipients: &[String]) -> crate::Result<()>;
}
