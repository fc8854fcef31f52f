//! Error types for deck generation
//!
//! Remote and rendering failures never surface here: they are absorbed by
//! the fallback path and recorded on the slide. What remains are caller
//! errors, which abort one topic, and deck-level failures.

use crate::config::ConfigError;
use deck_catalog::{CatalogError, ResolveError};

/// Why a single topic produced no slide
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicError {
    /// Topic id not in the catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Refinement rejected
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Deck-level error type
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote service could not be set up
    #[error("remote service setup failed: {0}")]
    RemoteSetup(String),

    /// A single topic failed
    #[error("topic {topic_id} failed: {source}")]
    Topic {
        /// Requested topic id
        topic_id: String,
        /// Underlying cause
        #[source]
        source: TopicError,
    },

    /// Generation was cancelled before completion
    #[error("deck generation cancelled")]
    Cancelled,

    /// Slides could not be serialized
    #[error("export failed: {0}")]
    Export(#[from] serde_json::Error),
}

impl DeckError {
    /// Wrap a topic failure
    #[inline]
    pub fn topic(topic_id: impl Into<String>, source: TopicError) -> Self {
        Self::Topic {
            topic_id: topic_id.into(),
            source,
        }
    }

    /// Check if the error was caused by the caller's input
    #[inline]
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Topic { .. } | Self::Config(_))
    }
}
