//! Resolved query requests

use crate::fingerprint::Fingerprint;
use crate::schema::ColumnSpec;
use crate::topic::Topic;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resolution parameters, kept sorted so fingerprints are canonical
pub type Parameters = BTreeMap<String, String>;

/// A single semantic query for one topic
///
/// Created per resolution call and discarded after use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Topic this request was resolved from
    pub topic_id: String,
    /// Text sent to the analysis service
    pub resolved_query_text: String,
    /// Parameters that shaped the text
    pub parameters: Parameters,
    /// Hash of (topic_id, parameters)
    pub fingerprint: Fingerprint,
    /// Result schema the topic declares
    pub columns: Vec<ColumnSpec>,
}

impl QueryRequest {
    /// Build a request for a topic, computing its fingerprint
    #[must_use]
    pub fn new(topic: &Topic, resolved_query_text: impl Into<String>, parameters: Parameters) -> Self {
        let fingerprint = Fingerprint::compute(&topic.id, &parameters);
        Self {
            topic_id: topic.id.clone(),
            resolved_query_text: resolved_query_text.into(),
            parameters,
            fingerprint,
            columns: topic.required_fields.clone(),
        }
    }

    /// Check if the request carries a user refinement
    #[inline]
    #[must_use]
    pub fn is_refined(&self) -> bool {
        !self.parameters.is_empty()
    }
}
