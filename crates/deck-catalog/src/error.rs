//! Caller-class errors
//!
//! Both errors abort the slide for one topic and are shown to the user;
//! neither is ever absorbed by the fallback path.

/// Catalog lookup and construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No topic with this id
    #[error("unknown topic: {0}")]
    UnknownTopic(String),

    /// Two topics share an id
    #[error("duplicate topic id: {0}")]
    DuplicateTopic(String),
}

/// Query resolution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Refinement violates the topic's field contract
    #[error("invalid refinement for {topic_id}: {reason}")]
    InvalidRefinement {
        /// Topic being resolved
        topic_id: String,
        /// What was wrong
        reason: String,
    },
}

impl ResolveError {
    /// Create invalid refinement error
    #[inline]
    pub fn invalid(topic_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRefinement {
            topic_id: topic_id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CatalogError::UnknownTopic("nonexistent_topic".to_string());
        assert_eq!(err.to_string(), "unknown topic: nonexistent_topic");

        let err = ResolveError::invalid("peak_traffic_hours", "column `zone` is not exposed");
        assert!(err.to_string().contains("invalid refinement for peak_traffic_hours"));
    }
}
