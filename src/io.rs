//! HTTP client abstraction for testability

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::record::HttpMethod;

/// Per-request timeout so a hung endpoint cannot stall the cycle
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A fully-described probe request
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Option<serde_json::Value>,
}

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Issue one request and return the response status
    async fn send(&self, request: &ProbeRequest) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| crate::WatchpostError::Http(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: &ProbeRequest) -> crate::Result<HttpResponse> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.into(), request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            crate::WatchpostError::Http(format!(
                "{} {} failed: {}",
                request.method, request.url, e
            ))
        })?;

        let status = response.status().as_u16();
        tracing::debug!("{} {} -> {}", request.method, request.url, status);
        Ok(HttpResponse { status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A URL that will always refuse connections (port 1 is reserved and unbound)
    const UNREACHABLE_URL: &str = "http://127.0.0.1:1/test";

    fn unreachable_request() -> ProbeRequest {
        ProbeRequest {
            method: HttpMethod::Get,
            url: UNREACHABLE_URL.to_string(),
            headers: HashMap::new(),
            body: None,
        }
    }

    #[tokio::test]
    async fn connection_refused_returns_http_error() {
        let client = ReqwestHttpClient::new().unwrap();
        let err = client.send(&unreachable_request()).await.unwrap_err();

        match &err {
            crate::WatchpostError::Http(msg) => {
                assert!(
                    msg.starts_with("GET http://127.0.0.1:1/test failed:"),
                    "{msg}"
                );
            }
            other => panic!("expected WatchpostError::Http, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn post_with_body_connection_refused_returns_http_error() {
        let client = ReqwestHttpClient::new().unwrap();
        let request = ProbeRequest {
            method: HttpMethod::Post,
            url: UNREACHABLE_URL.to_string(),
            headers: HashMap::from([("X-Key".to_string(), "k".to_string())]),
            body: Some(serde_json::json!({"ping": true})),
        };

        let err = client.send(&request).await.unwrap_err();
        match &err {
            crate::WatchpostError::Http(msg) => {
                assert!(msg.starts_with("POST "), "{msg}");
            }
            other => panic!("expected WatchpostError::Http, got {other:?}"),
        }
    }
}
