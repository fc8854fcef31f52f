//! Chart specifications and rendered artifacts

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Chart family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChartKind {
    /// Bars per category
    Bar,
    /// Share of a whole
    Pie,
    /// Values over time
    Line,
    /// Single headline value
    Gauge,
    /// Plain rows
    Table,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Bar => "BAR",
            Self::Pie => "PIE",
            Self::Line => "LINE",
            Self::Gauge => "GAUGE",
            Self::Table => "TABLE",
        };
        f.write_str(s)
    }
}

/// Visual channel a column is mapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Horizontal axis
    X,
    /// Vertical axis
    Y,
    /// Slice/category label
    Label,
    /// Slice size or gauge value
    Value,
}

/// Channel to column mapping
pub type Encoding = BTreeMap<Channel, String>;

/// Rendering backend, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackendKind {
    /// Full-featured interactive charting
    PrimaryViz,
    /// Simpler declarative charting
    SecondaryViz,
    /// Host UI built-in charts
    NativeWidget,
    /// Text table, always available
    PlainTable,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PrimaryViz => "PRIMARY_VIZ",
            Self::SecondaryViz => "SECONDARY_VIZ",
            Self::NativeWidget => "NATIVE_WIDGET",
            Self::PlainTable => "PLAIN_TABLE",
        };
        f.write_str(s)
    }
}

/// Figure styling preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    /// Light template, soft palette
    #[default]
    Modern,
    /// Library default look
    Classic,
    /// No gridlines, monochrome
    Minimal,
}

impl FromStr for ChartStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "modern" => Ok(Self::Modern),
            "classic" => Ok(Self::Classic),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!("unknown chart style: {other}")),
        }
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Modern => "modern",
            Self::Classic => "classic",
            Self::Minimal => "minimal",
        };
        f.write_str(s)
    }
}

/// Selected chart and the backend that rendered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Chart family
    pub chart_kind: ChartKind,
    /// Channel mapping
    pub encoding: Encoding,
    /// Backend that produced the artifact
    pub backend_used: BackendKind,
}

impl ChartSpec {
    /// Create new chart spec
    #[inline]
    #[must_use]
    pub fn new(chart_kind: ChartKind, encoding: Encoding, backend_used: BackendKind) -> Self {
        Self {
            chart_kind,
            encoding,
            backend_used,
        }
    }

    /// Terminal table spec
    #[inline]
    #[must_use]
    pub fn table() -> Self {
        Self::new(ChartKind::Table, Encoding::new(), BackendKind::PlainTable)
    }

    /// Column mapped to a channel
    #[inline]
    #[must_use]
    pub fn column(&self, channel: Channel) -> Option<&str> {
        self.encoding.get(&channel).map(String::as_str)
    }
}

/// Renderable output of a backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum Artifact {
    /// JSON figure description for a charting frontend
    Figure(serde_json::Value),
    /// Preformatted text table
    Table(String),
}

impl Artifact {
    /// Check if this is a text table
    #[inline]
    #[must_use]
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_priority_order() {
        assert!(BackendKind::PrimaryViz < BackendKind::SecondaryViz);
        assert!(BackendKind::SecondaryViz < BackendKind::NativeWidget);
        assert!(BackendKind::NativeWidget < BackendKind::PlainTable);
    }

    #[test]
    fn chart_style_parse() {
        assert_eq!("Modern".parse::<ChartStyle>().unwrap(), ChartStyle::Modern);
        assert_eq!("minimal".parse::<ChartStyle>().unwrap(), ChartStyle::Minimal);
        assert!("fancy".parse::<ChartStyle>().is_err());
    }

    #[test]
    fn chart_kind_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&ChartKind::Pie).unwrap(), "\"PIE\"");
        assert_eq!(ChartKind::Gauge.to_string(), "GAUGE");
    }

    #[test]
    fn table_spec() {
        let spec = ChartSpec::table();
        assert_eq!(spec.chart_kind, ChartKind::Table);
        assert_eq!(spec.backend_used, BackendKind::PlainTable);
        assert!(spec.column(Channel::X).is_none());
    }
}
