//! Analysis topics

use crate::schema::ColumnSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart family a topic prefers when the data allows it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartHint {
    /// Share of a whole (pie when the shape fits)
    Distribution,
    /// Change over time
    Trend,
    /// Side-by-side values
    Comparison,
    /// Headline numbers
    Summary,
}

impl fmt::Display for ChartHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Distribution => "distribution",
            Self::Trend => "trend",
            Self::Comparison => "comparison",
            Self::Summary => "summary",
        };
        f.write_str(s)
    }
}

/// Parameterized query description
///
/// `template` carries a [`IntentTemplate::PLACEHOLDER`] where a refinement
/// is spliced in; `default_phrasing` is used verbatim when there is none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentTemplate {
    /// Template with a refinement placeholder
    pub template: String,
    /// Phrasing used when no refinement is given
    pub default_phrasing: String,
}

impl IntentTemplate {
    /// Placeholder substituted by the refinement text
    pub const PLACEHOLDER: &'static str = "{refinement}";

    /// Create new intent template
    #[inline]
    #[must_use]
    pub fn new(template: impl Into<String>, default_phrasing: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            default_phrasing: default_phrasing.into(),
        }
    }

    /// Render with an optional refinement
    #[must_use]
    pub fn render(&self, refinement: Option<&str>) -> String {
        match refinement {
            Some(text) => self.template.replace(Self::PLACEHOLDER, text),
            None => self.default_phrasing.clone(),
        }
    }
}

/// A named, predefined analysis intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Stable identifier (`peak_traffic_hours`)
    pub id: String,
    /// Human title (`Peak Traffic Hours`)
    pub display_name: String,
    /// Query intent
    pub intent_template: IntentTemplate,
    /// Preferred chart family
    pub default_chart_hint: ChartHint,
    /// Declared result columns, in result order
    pub required_fields: Vec<ColumnSpec>,
    /// Rows produced by the demo data generator
    pub fallback_rows: usize,
}

impl Topic {
    /// Create new topic without columns
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        intent_template: IntentTemplate,
        default_chart_hint: ChartHint,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            intent_template,
            default_chart_hint,
            required_fields: Vec::new(),
            fallback_rows: 5,
        }
    }

    /// Add a declared column
    #[inline]
    #[must_use]
    pub fn with_field(mut self, column: ColumnSpec) -> Self {
        self.required_fields.push(column);
        self
    }

    /// Set number of demo rows
    #[inline]
    #[must_use]
    pub fn with_fallback_rows(mut self, rows: usize) -> Self {
        self.fallback_rows = rows;
        self
    }

    /// Look up a declared column
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&ColumnSpec> {
        self.required_fields.iter().find(|c| c.name == name)
    }

    /// Check if the topic exposes a column
    #[inline]
    #[must_use]
    pub fn exposes(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Metric columns in declared order
    pub fn metrics(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.required_fields.iter().filter(|c| c.is_metric())
    }

    /// Dimension columns in declared order
    pub fn dimensions(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.required_fields.iter().filter(|c| c.is_dimension())
    }

    /// Declared column names
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.required_fields.iter().map(|c| c.name.as_str()).collect()
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}
