//! Typed scalar values and result rows

use crate::schema::ColumnType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// One result record: column name to value, in column order
pub type Row = IndexMap<String, Scalar>;

/// A typed cell value
///
/// Serialized untagged so rows read as plain JSON objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Scalar {
    /// Missing value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
}

impl Scalar {
    /// Numeric view of the value, if it has one
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Check if value is numeric
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Check if value is null
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert a JSON value into a scalar
    ///
    /// Arrays and objects have no scalar form and yield `None`.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_f64().map(Self::Float)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Coerce the value into the declared column type
    ///
    /// Nulls pass through unchanged. Returns `None` when the value cannot
    /// represent the target type (e.g. `"abc"` as an integer). Numeric
    /// targets reject `NaN` and infinities.
    #[must_use]
    pub fn coerce(&self, target: ColumnType) -> Option<Self> {
        match (self, target) {
            (Self::Null, _) => Some(Self::Null),

            (Self::Int(v), ColumnType::Integer) => Some(Self::Int(*v)),
            (Self::Float(v), ColumnType::Integer) => {
                if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
                    Some(Self::Int(*v as i64))
                } else {
                    None
                }
            }
            (Self::Text(s), ColumnType::Integer) => s.trim().parse().ok().map(Self::Int),

            (Self::Int(v), ColumnType::Float) => Some(Self::Float(*v as f64)),
            (Self::Float(v), ColumnType::Float) => v.is_finite().then_some(Self::Float(*v)),
            (Self::Text(s), ColumnType::Float) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Self::Float),

            (Self::Text(s), ColumnType::Text) => Some(Self::Text(s.clone())),
            (Self::Int(_) | Self::Float(_) | Self::Bool(_), ColumnType::Text) => {
                Some(Self::Text(self.to_string()))
            }

            (Self::Bool(_), ColumnType::Integer | ColumnType::Float) => None,
        }
    }

    /// Stable key for distinct-value counting (floats are not `Hash`)
    #[inline]
    #[must_use]
    pub fn distinct_key(&self) -> String {
        match self {
            Self::Text(s) => format!("t:{s}"),
            other => format!("v:{other}"),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Column names of a row set, taken from the first row
#[must_use]
pub fn column_names(rows: &[Row]) -> Vec<&str> {
    rows.first()
        .map(|row| row.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
