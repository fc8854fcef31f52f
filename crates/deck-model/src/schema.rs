//! Declared result schema of a topic

use serde::{Deserialize, Serialize};

/// Declared value type of a result column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnType {
    /// Whole numbers
    Integer,
    /// Real numbers
    Float,
    /// Free text, categories and dates
    Text,
}

/// How the synthesizer and chart selector treat a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ColumnRole {
    /// Grouping/labeling column
    Dimension,
    /// Aggregated column (count, mean, min/max)
    Metric,
}

/// Value domain used to synthesize demo rows for a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleDomain {
    /// Uniform values in `[min, max)`
    Range { min: f64, max: f64 },
    /// Enumerated categories, cycled in order
    Categories { values: Vec<String> },
    /// Integer sequence `start, start + step, ...`
    Sequence { start: i64, step: i64 },
}

impl SampleDomain {
    /// Numeric range domain
    #[inline]
    #[must_use]
    pub fn range(min: f64, max: f64) -> Self {
        Self::Range { min, max }
    }

    /// Categorical domain
    #[must_use]
    pub fn categories<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Categories {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Integer sequence domain
    #[inline]
    #[must_use]
    pub fn sequence(start: i64, step: i64) -> Self {
        Self::Sequence { start, step }
    }
}

/// One declared result column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name as it appears in rows (lowercase snake case)
    pub name: String,
    /// Human-readable label
    pub label: String,
    /// Declared value type
    pub column_type: ColumnType,
    /// Dimension or metric
    pub role: ColumnRole,
    /// Whether the column orders rows in time (hour, month, date)
    pub time_like: bool,
    /// Domain for synthetic rows
    pub domain: SampleDomain,
}

impl ColumnSpec {
    /// Create a column with a label derived from its name
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        column_type: ColumnType,
        role: ColumnRole,
        domain: SampleDomain,
    ) -> Self {
        let name = name.into();
        Self {
            label: title_case(&name),
            name,
            column_type,
            role,
            time_like: false,
            domain,
        }
    }

    /// Dimension column
    #[inline]
    #[must_use]
    pub fn dimension(name: impl Into<String>, column_type: ColumnType, domain: SampleDomain) -> Self {
        Self::new(name, column_type, ColumnRole::Dimension, domain)
    }

    /// Metric column
    #[inline]
    #[must_use]
    pub fn metric(name: impl Into<String>, column_type: ColumnType, domain: SampleDomain) -> Self {
        Self::new(name, column_type, ColumnRole::Metric, domain)
    }

    /// Mark as time-like
    #[inline]
    #[must_use]
    pub fn time_like(mut self) -> Self {
        self.time_like = true;
        self
    }

    /// Override the label
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Check if this is a metric column
    #[inline]
    #[must_use]
    pub fn is_metric(&self) -> bool {
        self.role == ColumnRole::Metric
    }

    /// Check if this is a dimension column
    #[inline]
    #[must_use]
    pub fn is_dimension(&self) -> bool {
        self.role == ColumnRole::Dimension
    }

    /// Check if values of this column are numeric
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self.column_type, ColumnType::Integer | ColumnType::Float)
    }
}

/// `avg_speed_mph` -> `Avg Speed Mph`
fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
