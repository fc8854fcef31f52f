//! Analysis service transport
//!
//! Implementations return the raw JSON body and classify transport
//! faults themselves; contract validation lives in [`crate::response`].

use crate::error::RemoteError;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wire request to the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalystRequest {
    /// Natural-language query
    pub query: String,
    /// Semantic model the service resolves columns against
    pub semantic_model: String,
}

impl AnalystRequest {
    /// Create new request
    #[inline]
    #[must_use]
    pub fn new(query: impl Into<String>, semantic_model: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            semantic_model: semantic_model.into(),
        }
    }
}

/// Natural-language to data service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Submit a query, returning the raw response body
    ///
    /// # Errors
    /// - `ServiceUnavailable` for transport, auth and availability faults
    /// - `SemanticError` when the service rejects the request
    /// - `MalformedResponse` when the body is not JSON
    async fn analyze(&self, request: &AnalystRequest) -> Result<serde_json::Value, RemoteError>;

    /// Check that the service is reachable
    ///
    /// # Errors
    /// Returns the classified fault if it is not
    async fn ping(&self) -> Result<(), RemoteError>;
}

/// JSON-over-HTTP binding of [`AnalysisService`]
#[derive(Debug, Clone)]
pub struct HttpAnalysisService {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAnalysisService {
    /// Create a service posting to `endpoint`
    ///
    /// `timeout` bounds each HTTP exchange; the client applies its own
    /// bound on top.
    ///
    /// # Errors
    /// Returns `ServiceUnavailable` if the HTTP client cannot be built
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::ServiceUnavailable(format!("http client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Configured endpoint
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &AnalystRequest) -> Result<serde_json::Value, RemoteError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| RemoteError::MalformedResponse(format!("body is not JSON: {e}")))
    }

    async fn ping(&self) -> Result<(), RemoteError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(transport_error)?;

        // Reachable and authorized is enough; the endpoint may only accept POST.
        let status = response.status();
        if status.is_success() || status == StatusCode::METHOD_NOT_ALLOWED || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(classify_status(status, ""))
        }
    }
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        RemoteError::ServiceUnavailable(format!("request timed out: {err}"))
    } else if err.is_connect() {
        RemoteError::ServiceUnavailable(format!("connection failed: {err}"))
    } else {
        RemoteError::ServiceUnavailable(err.to_string())
    }
}

/// Map a non-success HTTP status to an error class
#[must_use]
pub fn classify_status(status: StatusCode, body: &str) -> RemoteError {
    let detail = if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {}", truncate(body.trim(), 200))
    };

    match status.as_u16() {
        401 | 403 | 408 | 429 => RemoteError::ServiceUnavailable(detail),
        s if (500..600).contains(&s) => RemoteError::ServiceUnavailable(detail),
        s if (400..500).contains(&s) => RemoteError::SemanticError(detail),
        _ => RemoteError::MalformedResponse(format!("unexpected {detail}")),
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response on an ephemeral port
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 8192];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/api/v2/analyst/message")
    }

    fn request() -> AnalystRequest {
        AnalystRequest::new("peak traffic hours", "@DEMO.DEMO.SEMANTIC_MODELS/TRAFFIC.yaml")
    }

    #[test]
    fn status_classification() {
        let unavailable = [401, 403, 408, 429, 500, 502, 503, 504];
        for code in unavailable {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(
                matches!(classify_status(status, ""), RemoteError::ServiceUnavailable(_)),
                "{code}"
            );
        }
        for code in [400, 404, 422] {
            let status = StatusCode::from_u16(code).unwrap();
            assert!(
                matches!(classify_status(status, "bad"), RemoteError::SemanticError(_)),
                "{code}"
            );
        }
        assert!(matches!(
            classify_status(StatusCode::MULTIPLE_CHOICES, ""),
            RemoteError::MalformedResponse(_)
        ));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }

    #[test]
    fn request_wire_shape() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(
            value,
            json!({"query": "peak traffic hours", "semantic_model": "@DEMO.DEMO.SEMANTIC_MODELS/TRAFFIC.yaml"})
        );
    }

    #[tokio::test]
    async fn http_success_returns_body() {
        let endpoint = serve_once("200 OK", r#"{"results": [{"HOUR": 8}], "confidence": 0.9}"#).await;
        let service = HttpAnalysisService::new(endpoint, Duration::from_secs(5)).unwrap();

        let body = service.analyze(&request()).await.unwrap();
        assert_eq!(body["results"][0]["HOUR"], 8);
    }

    #[tokio::test]
    async fn http_503_is_unavailable() {
        let endpoint = serve_once("503 Service Unavailable", r#"{"message": "warehouse suspended"}"#).await;
        let service = HttpAnalysisService::new(endpoint, Duration::from_secs(5)).unwrap();

        let err = service.analyze(&request()).await.unwrap_err();
        assert!(matches!(err, RemoteError::ServiceUnavailable(ref m) if m.contains("warehouse suspended")));
    }

    #[tokio::test]
    async fn http_400_is_semantic() {
        let endpoint = serve_once("400 Bad Request", r#"{"message": "unknown column"}"#).await;
        let service = HttpAnalysisService::new(endpoint, Duration::from_secs(5)).unwrap();

        let err = service.analyze(&request()).await.unwrap_err();
        assert!(matches!(err, RemoteError::SemanticError(_)));
    }

    #[tokio::test]
    async fn http_garbage_body_is_malformed() {
        let endpoint = serve_once("200 OK", "<html>oops</html>").await;
        let service = HttpAnalysisService::new(endpoint, Duration::from_secs(5)).unwrap();

        let err = service.analyze(&request()).await.unwrap_err();
        assert!(matches!(err, RemoteError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = HttpAnalysisService::new(format!("http://{addr}/"), Duration::from_secs(2)).unwrap();
        let err = service.ping().await.unwrap_err();
        assert!(err.is_transient());
    }
}
