//! Deckwright data model
//!
//! Types shared by every stage of the topic-to-slide pipeline.
//!
//! # Core Concepts
//!
//! - [`Topic`]: a predefined analysis intent with its declared result schema
//! - [`QueryRequest`]: one resolved query, addressed by its [`Fingerprint`]
//! - [`AnalysisResult`]: rows plus provenance; rows are never absent
//! - [`Insight`] and [`ChartSpec`]: what the synthesizer and selector derive
//! - [`Slide`]: the immutable unit exported to a deck
//!
//! # Example
//!
//! ```rust,ignore
//! use deck_model::{AnalysisResult, Confidence};
//!
//! let result = AnalysisResult::remote(rows, "SELECT 1", Confidence::new(0.9)?);
//! assert!(!result.is_fallback());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod chart;
mod fingerprint;
mod insight;
mod request;
mod result;
mod scalar;
mod schema;
mod slide;
mod topic;

pub use chart::{Artifact, BackendKind, ChartKind, ChartSpec, ChartStyle, Channel, Encoding};
pub use fingerprint::{Fingerprint, FingerprintError};
pub use insight::{Insight, KeyMetric};
pub use request::{Parameters, QueryRequest};
pub use result::{
    AnalysisResult, Confidence, ConfidenceError, ConfidenceLevel, ErrorDescriptor, ErrorKind,
    ResultSource,
};
pub use scalar::{column_names, Row, Scalar};
pub use schema::{ColumnRole, ColumnSpec, ColumnType, SampleDomain};
pub use slide::Slide;
pub use topic::{ChartHint, IntentTemplate, Topic};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
