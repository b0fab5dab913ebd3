//! HTTP probe: one request per record, classified into an outcome

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::io::{HttpClient, ProbeRequest};
use crate::record::EndpointCheckRecord;

/// What the probed endpoint actually returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActualStatus {
    /// An HTTP exchange completed with this status code
    Code(u16),
    /// The exchange never completed (refused, timeout, DNS, bad response)
    Unreachable,
}

impl fmt::Display for ActualStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActualStatus::Code(code) => write!(f, "{}", code),
            ActualStatus::Unreachable => write!(f, "ERROR"),
        }
    }
}

/// The result of probing one record in one cycle
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub timestamp: DateTime<Utc>,
    pub actual: ActualStatus,
    pub passed: bool,
    pub error: Option<String>,
}

/// Executes one HTTP request per record and classifies the result
pub struct HttpProbe {
    http: Arc<dyn HttpClient>,
}

impl HttpProbe {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self { http }
    }

    /// Probe the record's endpoint once. Never fails: transport errors
    /// become unreachable outcomes with the cause recorded.
    pub async fn check(&self, record: &EndpointCheckRecord) -> CheckOutcome {
        let request = ProbeRequest {
            method: record.method,
            url: record.endpoint.clone(),
            headers: record.headers.clone(),
            body: if record.method.allows_body() {
                record.body.clone()
            } else {
                None
            },
        };

        let timestamp = Utc::now();
        match self.http.send(&request).await {
            Ok(response) => CheckOutcome {
                timestamp,
                actual: ActualStatus::Code(response.status),
                passed: response.status == record.expected_status,
                error: None,
            },
            Err(e) => {
                tracing::debug!("Probe of {} failed: {}", record.endpoint, e);
                CheckOutcome {
                    timestamp,
                    actual: ActualStatus::Unreachable,
                    passed: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{HttpResponse, MockHttpClient};
    use crate::record::HttpMethod;
    use std::collections::HashMap;

    fn record() -> EndpointCheckRecord {
        EndpointCheckRecord {
            client: "Acme".to_string(),
            project_name: "Health".to_string(),
            endpoint: "https://x/health".to_string(),
            expected_status: 200,
            notify_emails: vec!["a@x.com".to_string()],
            body: None,
            headers: HashMap::new(),
            method: HttpMethod::Get,
        }
    }

    #[tokio::test]
    async fn expected_status_passes() {
        let mut mock = MockHttpClient::new();
        mock.expect_send()
            .withf(|req| req.url == "https://x/health" && req.method == HttpMethod::Get)
            .returning(|_| Box::pin(async { Ok(HttpResponse { status: 200 }) }));

        let probe = HttpProbe::new(Arc::new(mock));
        let outcome = probe.check(&record()).await;

        assert!(outcome.passed);
        assert_eq!(outcome.actual, ActualStatus::Code(200));
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn unexpected_status_fails() {
        let mut mock = MockHttpClient::new();
        mock.expect_send()
            .returning(|_| Box::pin(async { Ok(HttpResponse { status: 500 }) }));

        let probe = HttpProbe::new(Arc::new(mock));
        let outcome = probe.check(&record()).await;

        assert!(!outcome.passed);
        assert_eq!(outcome.actual, ActualStatus::Code(500));
        assert!(outcome.error.is_none());
    }

    #[tokio::test]
    async fn transport_failure_is_unreachable_with_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_send().returning(|_| {
            Box::pin(async {
                Err(crate::WatchpostError::Http(
                    "GET https://x/health failed: connection refused".to_string(),
                ))
            })
        });

        let probe = HttpProbe::new(Arc::new(mock));
        let outcome = probe.check(&record()).await;

        assert!(!outcome.passed);
        assert_eq!(outcome.actual, ActualStatus::Unreachable);
        assert!(outcome.error.as_deref().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn body_is_attached_for_post_only() {
        let mut mock = MockHttpClient::new();
        mock.expect_send()
            .withf(|req| req.body == Some(serde_json::json!({"ping": 1})))
            .returning(|_| Box::pin(async { Ok(HttpResponse { status: 200 }) }));

        let mut rec = record();
        rec.method = HttpMethod::Post;
        rec.body = Some(serde_json::json!({"ping": 1}));

        let probe = HttpProbe::new(Arc::new(mock));
        let outcome = probe.check(&rec).await;
        assert!(outcome.passed);
    }

    #[tokio::test]
    async fn body_is_dropped_for_get() {
        let mut mock = MockHttpClient::new();
        mock.expect_send()
            .withf(|req| req.body.is_none())
            .returning(|_| Box::pin(async { Ok(HttpResponse { status: 200 }) }));

        let mut rec = record();
        rec.body = Some(serde_json::json!({"ping": 1}));

        let probe = HttpProbe::new(Arc::new(mock));
        let outcome = probe.check(&rec).await;
        assert!(outcome.passed);
    }

    #[test]
    fn unreachable_renders_as_error() {
        assert_eq!(ActualStatus::Unreachable.to_string(), "ERROR");
        assert_eq!(ActualStatus::Code(404).to_string(), "404");
    }
}
