//! Deckwright insight synthesis
//!
//! Turns an [`deck_model::AnalysisResult`] into a templated summary and an
//! ordered list of key metrics. Output depends only on the rows and the
//! topic, never on provenance.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod format;
mod stats;
pub mod synthesizer;

pub use format::{format_float, format_integer};
pub use synthesizer::{synthesize, SynthesisError};
