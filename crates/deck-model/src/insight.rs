//! Natural-language insights

use crate::result::Confidence;
use serde::{Deserialize, Serialize};

/// One labelled headline number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMetric {
    /// What the value measures
    pub label: String,
    /// Formatted value
    pub value: String,
}

impl KeyMetric {
    /// Create new key metric
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Summary and key metrics derived from an analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Templated summary sentence(s)
    pub summary_text: String,
    /// Ordered headline numbers
    pub key_metrics: Vec<KeyMetric>,
    /// Confidence carried over from the result
    pub confidence: Confidence,
}

impl Insight {
    /// Sentinel insight for a result without rows
    #[must_use]
    pub fn no_data(topic_name: &str, confidence: Confidence) -> Self {
        Self {
            summary_text: format!("No data was available for {topic_name}."),
            key_metrics: Vec::new(),
            confidence,
        }
    }

    /// Check if this is the no-data sentinel
    #[inline]
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        self.key_metrics.is_empty() && self.summary_text.starts_with("No data was available")
    }
}
