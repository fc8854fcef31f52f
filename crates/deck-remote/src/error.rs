//! Remote error taxonomy

use deck_model::{ErrorDescriptor, ErrorKind};

/// Failure talking to the analysis service
///
/// Always absorbed by the fallback path; users only see it as a
/// `FALLBACK` source and the attached [`ErrorDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// Network, auth, service down or timeout
    #[error("analysis service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Request understood but not resolvable to a valid query
    #[error("analysis service could not answer: {0}")]
    SemanticError(String),

    /// Response violates the expected contract
    #[error("malformed analysis response: {0}")]
    MalformedResponse(String),
}

impl RemoteError {
    /// Descriptor kind for this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ServiceUnavailable(_) => ErrorKind::ServiceUnavailable,
            Self::SemanticError(_) => ErrorKind::SemanticError,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    /// Detail message without the class prefix
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::ServiceUnavailable(m) | Self::SemanticError(m) | Self::MalformedResponse(m) => m,
        }
    }

    /// Descriptor recorded on the fallback result
    #[must_use]
    pub fn to_descriptor(&self) -> ErrorDescriptor {
        ErrorDescriptor::new(self.kind(), self.message())
    }

    /// Check if the same request could succeed later
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_))
    }
}
