//! Endpoint check records parsed from configuration rows

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// HTTP method for a check request.
///
/// Parsed case-insensitively; absent, empty, or unrecognized input
/// defaults to GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_uppercase().as_str() {
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            _ => HttpMethod::Get,
        }
    }

    /// Whether a request body is attached for this method
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// One raw CSV row, before validation. Columns:
/// `client;project_name;endpoint;expected_http_status;notify_emails;body_json;headers_json;http_method`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRow {
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub expected_http_status: String,
    #[serde(default)]
    pub notify_emails: String,
    #[serde(default)]
    pub body_json: String,
    #[serde(default)]
    pub headers_json: String,
    #[serde(default)]
    pub http_method: String,
}

/// The validated description of one configured endpoint check
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointCheckRecord {
    pub client: String,
    /// Identifies the per-project log file; records sharing a name append
    /// to the same file
    pub project_name: String,
    pub endpoint: String,
    pub expected_status: u16,
    pub notify_emails: Vec<String>,
    pub body: Option<serde_json::Value>,
    pub headers: HashMap<String, String>,
    pub method: HttpMethod,
}

impl EndpointCheckRecord {
    /// Validate one raw row into a record.
    ///
    /// Rejected rows: empty endpoint, expected status outside 100-599,
    /// malformed JSON in `body_json` or `headers_json`.
    pub fn from_row(row: RawRow) -> crate::Result<Self> {
        let endpoint = row.endpoint.trim().to_string();
        if endpoint.is_empty() {
            return Err(crate::WatchpostError::Record(
                "endpoint is required".to_string(),
            ));
        }

        let expected_status: u16 = row.expected_http_status.trim().parse().map_err(|_| {
            crate::WatchpostError::Record(format!(
                "expected_http_status is not a number: {:?}",
                row.expected_http_status
            ))
        })?;
        if !(100..=599).contains(&expected_status) {
            return Err(crate::WatchpostError::Record(format!(
                "expected_http_status out of range: {}",
                expected_status
            )));
        }

        let body = if row.body_json.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&row.body_json).map_err(|e| {
                crate::WatchpostError::Record(format!("invalid body_json: {}", e))
            })?)
        };

        let headers: HashMap<String, String> = if row.headers_json.trim().is_empty() {
            HashMap::new()
        } else {
            serde_json::from_str(&row.headers_json).map_err(|e| {
                crate::WatchpostError::Record(format!("invalid headers_json: {}", e))
            })?
        };

        let notify_emails = row
            .notify_emails
            .split(',')
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string)
            .collect();

        let project_name = if row.project_name.trim().is_empty() {
            "default_project".to_string()
        } else {
            row.project_name.trim().to_string()
        };

        Ok(Self {
            client: row.client.trim().to_string(),
            project_name,
            endpoint,
            expected_status,
            notify_emails,
            body,
            headers,
            method: HttpMethod::parse(&row.http_method),
        })
    }
}
