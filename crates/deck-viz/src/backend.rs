//! Rendering backend seam

use deck_model::{Artifact, BackendKind, ChartKind, ChartStyle, Channel, Encoding, Row, Scalar, Topic};
use serde_json::Value;

/// Failure to render with one backend; the selector tries the next
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Backend cannot draw this chart family
    #[error("{backend} does not support {chart} charts")]
    Unsupported {
        /// Backend asked
        backend: BackendKind,
        /// Chart family requested
        chart: ChartKind,
    },

    /// Encoding lacks a channel the chart needs
    #[error("{chart} chart needs a {channel:?} channel")]
    MissingChannel {
        /// Chart family
        chart: ChartKind,
        /// Missing channel
        channel: Channel,
    },

    /// Column mapped to a numeric channel holds no number
    #[error("column `{column}` has no numeric value")]
    NonNumeric {
        /// Offending column
        column: String,
    },
}

/// Everything a backend needs to draw one chart
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Chart family
    pub chart_kind: ChartKind,
    /// Channel mapping
    pub encoding: &'a Encoding,
    /// Result rows
    pub rows: &'a [Row],
    /// Topic, for titles and column labels
    pub topic: &'a Topic,
    /// Figure styling preset
    pub style: ChartStyle,
}

impl<'a> RenderRequest<'a> {
    /// Column mapped to `channel`
    ///
    /// # Errors
    /// Returns `MissingChannel` if the encoding has none
    pub fn channel(&self, channel: Channel) -> Result<&'a str, RenderError> {
        self.encoding
            .get(&channel)
            .map(String::as_str)
            .ok_or(RenderError::MissingChannel {
                chart: self.chart_kind,
                channel,
            })
    }

    /// Human label for a column
    #[must_use]
    pub fn label(&self, column: &str) -> String {
        self.topic
            .field(column)
            .map_or_else(|| column.to_string(), |spec| spec.label.clone())
    }

    /// Chart title
    #[inline]
    #[must_use]
    pub fn title(&self) -> &'a str {
        &self.topic.display_name
    }

    /// Column values as JSON, in row order
    #[must_use]
    pub fn values(&self, column: &str) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| row.get(column).map_or(Value::Null, scalar_json))
            .collect()
    }

    /// First numeric value of a column
    ///
    /// # Errors
    /// Returns `NonNumeric` if the first row holds no number there
    pub fn headline(&self, column: &str) -> Result<f64, RenderError> {
        self.rows
            .first()
            .and_then(|row| row.get(column))
            .and_then(Scalar::as_f64)
            .ok_or_else(|| RenderError::NonNumeric {
                column: column.to_string(),
            })
    }

    /// Rows as JSON objects
    #[must_use]
    pub fn records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                Value::Object(
                    row.iter()
                        .map(|(k, v)| (k.clone(), scalar_json(v)))
                        .collect(),
                )
            })
            .collect()
    }
}

/// JSON form of a cell; non-finite floats become null
#[must_use]
pub fn scalar_json(value: &Scalar) -> Value {
    match value {
        Scalar::Null => Value::Null,
        Scalar::Bool(b) => Value::Bool(*b),
        Scalar::Int(v) => Value::from(*v),
        Scalar::Float(v) => serde_json::Number::from_f64(*v).map_or(Value::Null, Value::Number),
        Scalar::Text(s) => Value::String(s.clone()),
    }
}

/// One tier of the rendering fallback chain
pub trait RenderBackend: Send + Sync {
    /// Which tier this is
    fn kind(&self) -> BackendKind;

    /// Whether the backend was enabled at startup
    fn is_available(&self) -> bool;

    /// Whether the backend can draw a chart family
    fn supports(&self, chart: ChartKind) -> bool;

    /// Render a chart
    ///
    /// # Errors
    /// Returns a `RenderError` when the chart cannot be drawn from this
    /// request; the caller moves on to the next backend
    fn render(&self, request: &RenderRequest<'_>) -> Result<Artifact, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_model::{ChartHint, IntentTemplate};

    #[test]
    fn scalar_json_handles_non_finite() {
        assert_eq!(scalar_json(&Scalar::Float(f64::NAN)), Value::Null);
        assert_eq!(scalar_json(&Scalar::Int(8)), Value::from(8));
        assert_eq!(scalar_json(&Scalar::from("Downtown")), Value::from("Downtown"));
    }

    #[test]
    fn missing_channel_reported() {
        let topic = Topic::new("t", "T", IntentTemplate::new("{refinement}", "t"), ChartHint::Trend);
        let encoding = Encoding::new();
        let request = RenderRequest {
            chart_kind: ChartKind::Bar,
            encoding: &encoding,
            rows: &[],
            topic: &topic,
            style: ChartStyle::Modern,
        };
        assert_eq!(
            request.channel(Channel::X),
            Err(RenderError::MissingChannel {
                chart: ChartKind::Bar,
                channel: Channel::X
            })
        );
        assert!(request.headline("count").is_err());
        assert_eq!(request.label("count"), "count");
    }
}
