//! Deckwright remote analysis
//!
//! - [`AnalysisService`]: transport seam to the natural-language analysis
//!   service, with an HTTP binding in [`HttpAnalysisService`]
//! - [`RemoteAnalysisClient`]: timeout, contract validation and row
//!   normalization on top of a service
//! - [`FallbackDataProvider`]: deterministic demo rows matching a topic's
//!   declared schema
//!
//! Remote failures never escape the pipeline: [`RemoteAnalysisClient::execute`]
//! turns every [`RemoteError`] into an empty fallback result carrying its
//! descriptor.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod client;
pub mod error;
pub mod fallback;
pub mod response;
pub mod service;

pub use client::{ConnectionStatus, RemoteAnalysisClient};
pub use error::RemoteError;
pub use fallback::{FallbackDataProvider, FallbackError};
pub use service::{AnalysisService, AnalystRequest, HttpAnalysisService};
