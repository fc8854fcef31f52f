//! Remote analysis client

use crate::error::RemoteError;
use crate::response::parse_response;
use crate::service::{AnalysisService, AnalystRequest};
use async_trait::async_trait;
use deck_model::{AnalysisResult, QueryRequest};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Semantic model used when none is configured
pub const DEFAULT_SEMANTIC_MODEL: &str = "@DEMO.DEMO.SEMANTIC_MODELS/TRAFFIC.yaml";

/// Default per-call bound
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a connection check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Service answered
    Connected,
    /// Remote disabled or unreachable; slides use demo data
    DemoMode {
        /// Why the service is not used
        reason: String,
    },
}

impl ConnectionStatus {
    /// Check if the service answered
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connected => f.write_str("connected"),
            Self::DemoMode { reason } => write!(f, "demo mode ({reason})"),
        }
    }
}

/// Executes [`QueryRequest`]s against an [`AnalysisService`]
///
/// The client does not retry; a failed call is reported once and the
/// caller decides whether to fall back.
#[derive(Clone)]
pub struct RemoteAnalysisClient {
    service: Arc<dyn AnalysisService>,
    enabled: bool,
    timeout: Duration,
    semantic_model: String,
}

impl fmt::Debug for RemoteAnalysisClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteAnalysisClient")
            .field("enabled", &self.enabled)
            .field("timeout", &self.timeout)
            .field("semantic_model", &self.semantic_model)
            .finish_non_exhaustive()
    }
}

impl RemoteAnalysisClient {
    /// Create a client over `service`
    ///
    /// A disabled client never touches the service and reports every
    /// request as unavailable.
    #[must_use]
    pub fn new(service: Arc<dyn AnalysisService>, enabled: bool) -> Self {
        Self {
            service,
            enabled,
            timeout: DEFAULT_TIMEOUT,
            semantic_model: DEFAULT_SEMANTIC_MODEL.to_string(),
        }
    }

    /// Client with no service behind it
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoService), false)
    }

    /// Set per-call timeout
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set semantic model
    #[inline]
    #[must_use]
    pub fn with_semantic_model(mut self, semantic_model: impl Into<String>) -> Self {
        self.semantic_model = semantic_model.into();
        self
    }

    /// Check if remote calls are attempted
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Per-call timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute a request, reporting failures
    ///
    /// # Errors
    /// - `ServiceUnavailable` if disabled, unreachable or over the timeout
    /// - `SemanticError` if the service rejects the query
    /// - `MalformedResponse` if the response violates the contract
    pub async fn try_execute(&self, request: &QueryRequest) -> Result<AnalysisResult, RemoteError> {
        if !self.enabled {
            return Err(RemoteError::ServiceUnavailable("remote analysis disabled".into()));
        }

        let wire = AnalystRequest::new(&request.resolved_query_text, &self.semantic_model);
        tracing::debug!(
            "Querying analysis service for {} [{}]",
            request.topic_id,
            request.fingerprint.short()
        );

        let body = tokio::time::timeout(self.timeout, self.service.analyze(&wire))
            .await
            .map_err(|_| {
                RemoteError::ServiceUnavailable(format!(
                    "no response within {:.1}s",
                    self.timeout.as_secs_f64()
                ))
            })??;

        let result = parse_response(&body, &request.columns)?;
        tracing::debug!(
            "Analysis service returned {} rows for {} (confidence {:.2})",
            result.row_count(),
            request.topic_id,
            result.confidence.value()
        );
        Ok(result)
    }

    /// Execute a request, turning failures into an empty fallback result
    pub async fn execute(&self, request: &QueryRequest) -> AnalysisResult {
        match self.try_execute(request).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("Remote analysis failed for {}: {}", request.topic_id, err);
                AnalysisResult::failed(err.to_descriptor())
            }
        }
    }

    /// Ping the service
    pub async fn check_connection(&self) -> ConnectionStatus {
        if !self.enabled {
            return ConnectionStatus::DemoMode {
                reason: "remote analysis disabled".into(),
            };
        }

        let outcome = tokio::time::timeout(self.timeout, self.service.ping()).await;
        match outcome {
            Ok(Ok(())) => ConnectionStatus::Connected,
            Ok(Err(err)) => ConnectionStatus::DemoMode {
                reason: err.to_string(),
            },
            Err(_) => ConnectionStatus::DemoMode {
                reason: format!("no response within {:.1}s", self.timeout.as_secs_f64()),
            },
        }
    }
}

/// Stand-in for a client built without a service
struct NoService;

#[async_trait]
impl AnalysisService for NoService {
    async fn analyze(&self, _request: &AnalystRequest) -> Result<serde_json::Value, RemoteError> {
        Err(RemoteError::ServiceUnavailable("no analysis service configured".into()))
    }

    async fn ping(&self) -> Result<(), RemoteError> {
        Err(RemoteError::ServiceUnavailable("no analysis service configured".into()))
    }
}
