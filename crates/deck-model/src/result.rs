//! Analysis results and confidence scores

use crate::scalar::{column_names, Row};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reliability score guaranteed to lie in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Sentinel for synthetic demo data
    pub const FALLBACK: Self = Self(0.5);

    /// No confidence at all (nothing was analyzed)
    pub const NONE: Self = Self(0.0);

    /// Create a confidence score
    ///
    /// # Errors
    /// Returns error if the value is non-finite or outside `[0, 1]`
    pub fn new(value: f64) -> Result<Self, ConfidenceError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ConfidenceError::OutOfRange(value))
        }
    }

    /// Raw score
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Badge level
    #[inline]
    #[must_use]
    pub fn level(self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.0)
    }

    /// Badge text, e.g. `High Confidence (95%)`
    #[must_use]
    pub fn badge(self) -> String {
        format!("{} ({:.0}%)", self.level(), self.0 * 100.0)
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ConfidenceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

/// Invalid confidence value
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfidenceError {
    /// Non-finite or outside `[0, 1]`
    #[error("confidence {0} outside [0, 1]")]
    OutOfRange(f64),
}

/// Coarse confidence band shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    /// 0.8 and above
    High,
    /// 0.6 up to 0.8
    Medium,
    /// Below 0.6
    Low,
}

impl ConfidenceLevel {
    /// Classify a raw score
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            Self::High
        } else if score >= 0.6 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::High => "High Confidence",
            Self::Medium => "Medium Confidence",
            Self::Low => "Low Confidence",
        };
        f.write_str(s)
    }
}

/// Where the rows of a result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultSource {
    /// The remote analysis service
    Remote,
    /// Synthetic demo data
    Fallback,
}

impl fmt::Display for ResultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => f.write_str("REMOTE"),
            Self::Fallback => f.write_str("FALLBACK"),
        }
    }
}

/// Classification carried by an [`ErrorDescriptor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Network, auth, service down or timeout
    ServiceUnavailable,
    /// Request understood but not resolvable to a valid query
    SemanticError,
    /// Response violates the expected contract
    MalformedResponse,
    /// Demo data could not be generated from the topic schema
    FallbackSchema,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ServiceUnavailable => "service unavailable",
            Self::SemanticError => "semantic error",
            Self::MalformedResponse => "malformed response",
            Self::FallbackSchema => "fallback schema error",
        };
        f.write_str(s)
    }
}

/// Recorded (and absorbed) failure behind a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Failure class
    pub kind: ErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl ErrorDescriptor {
    /// Create new descriptor
    #[inline]
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Unified result shape consumed by the synthesizer and chart selector
///
/// `rows` is never absent: a total failure is an empty sequence, so
/// downstream stages branch only on emptiness and [`ResultSource`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Result records
    pub rows: Vec<Row>,
    /// Query text generated by the service (or a demo marker)
    pub generated_query_text: String,
    /// Reliability score
    pub confidence: Confidence,
    /// Provenance
    pub source: ResultSource,
    /// Failure that led to this result, if any
    pub error: Option<ErrorDescriptor>,
    /// Natural-language explanation from the service
    pub explanation: Option<String>,
    /// Service request identifier
    pub request_id: Option<String>,
}

impl AnalysisResult {
    /// Result produced by the remote service
    #[must_use]
    pub fn remote(rows: Vec<Row>, generated_query_text: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            rows,
            generated_query_text: generated_query_text.into(),
            confidence,
            source: ResultSource::Remote,
            error: None,
            explanation: None,
            request_id: None,
        }
    }

    /// Synthetic result at the fallback sentinel confidence
    #[must_use]
    pub fn fallback(rows: Vec<Row>, generated_query_text: impl Into<String>) -> Self {
        Self {
            rows,
            generated_query_text: generated_query_text.into(),
            confidence: Confidence::FALLBACK,
            source: ResultSource::Fallback,
            error: None,
            explanation: None,
            request_id: None,
        }
    }

    /// Empty fallback result recording a failure
    #[must_use]
    pub fn failed(error: ErrorDescriptor) -> Self {
        Self {
            rows: Vec::new(),
            generated_query_text: String::new(),
            confidence: Confidence::NONE,
            source: ResultSource::Fallback,
            error: Some(error),
            explanation: None,
            request_id: None,
        }
    }

    /// Attach the failure that caused this result
    #[inline]
    #[must_use]
    pub fn with_error(mut self, error: ErrorDescriptor) -> Self {
        self.error = Some(error);
        self
    }

    /// Attach a service explanation
    #[inline]
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Attach a service request id
    #[inline]
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Check if there are no rows
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if rows are synthetic
    #[inline]
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.source == ResultSource::Fallback
    }

    /// Column names of the first row
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        column_names(&self.rows)
    }
}
