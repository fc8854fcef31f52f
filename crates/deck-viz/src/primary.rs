//! Interactive figure backend
//!
//! Emits a figure description (`data` traces plus `layout`) that a
//! browser-side charting library renders directly.

use crate::backend::{RenderBackend, RenderError, RenderRequest};
use crate::style::theme;
use deck_model::{Artifact, BackendKind, ChartKind, Channel};
use serde_json::{json, Value};

/// `PRIMARY_VIZ` tier
#[derive(Debug, Clone, Copy)]
pub struct PrimaryVizBackend {
    available: bool,
}

impl PrimaryVizBackend {
    /// Create backend
    #[inline]
    #[must_use]
    pub const fn new(available: bool) -> Self {
        Self { available }
    }

    fn trace(request: &RenderRequest<'_>) -> Result<Value, RenderError> {
        let palette = theme(request.style).palette;
        match request.chart_kind {
            ChartKind::Bar => {
                let x = request.channel(Channel::X)?;
                let y = request.channel(Channel::Y)?;
                Ok(json!({
                    "type": "bar",
                    "x": request.values(x),
                    "y": request.values(y),
                    "name": request.label(y),
                    "marker": {"color": palette[0]},
                }))
            }
            ChartKind::Line => {
                let x = request.channel(Channel::X)?;
                let y = request.channel(Channel::Y)?;
                Ok(json!({
                    "type": "scatter",
                    "mode": "lines+markers",
                    "line": {"shape": "spline", "color": palette[0]},
                    "x": request.values(x),
                    "y": request.values(y),
                    "name": request.label(y),
                }))
            }
            ChartKind::Pie => {
                let label = request.channel(Channel::Label)?;
                let value = request.channel(Channel::Value)?;
                Ok(json!({
                    "type": "pie",
                    "labels": request.values(label),
                    "values": request.values(value),
                    "marker": {"colors": palette},
                }))
            }
            ChartKind::Gauge => {
                let column = request.channel(Channel::Value)?;
                let value = request.headline(column)?;
                let top = if value > 0.0 { value * 1.2 } else { 1.0 };
                Ok(json!({
                    "type": "indicator",
                    "mode": "number+gauge",
                    "value": value,
                    "title": {"text": request.label(column)},
                    "gauge": {
                        "axis": {"range": [0.0, top]},
                        "bar": {"color": palette[0]},
                        "threshold": {"line": {"color": "red", "width": 4}, "thickness": 0.75, "value": value * 0.9},
                    },
                }))
            }
            ChartKind::Table => Err(RenderError::Unsupported {
                backend: BackendKind::PrimaryViz,
                chart: ChartKind::Table,
            }),
        }
    }

    fn layout(request: &RenderRequest<'_>) -> Value {
        let theme = theme(request.style);
        let mut layout = json!({
            "title": {"text": request.title(), "font": {"size": 16, "color": theme.title_color}},
            "template": theme.figure_template,
            "height": 450,
            "font": {"size": 12, "family": "Arial, sans-serif"},
            "margin": {"l": 40, "r": 40, "t": 60, "b": 40},
            "showlegend": request.chart_kind == ChartKind::Pie,
        });
        if let (Ok(x), Ok(y)) = (request.channel(Channel::X), request.channel(Channel::Y)) {
            layout["xaxis"] = json!({"title": {"text": request.label(x)}, "showgrid": theme.grid});
            layout["yaxis"] = json!({"title": {"text": request.label(y)}, "showgrid": theme.grid});
        }
        layout
    }
}

impl RenderBackend for PrimaryVizBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::PrimaryViz
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn supports(&self, chart: ChartKind) -> bool {
        matches!(chart, ChartKind::Bar | ChartKind::Pie | ChartKind::Line | ChartKind::Gauge)
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<Artifact, RenderError> {
        let trace = Self::trace(request)?;
        Ok(Artifact::Figure(json!({
            "data": [trace],
            "layout": Self::layout(request),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_model::{ChartHint, ChartStyle, Encoding, IntentTemplate, Row, Scalar, Topic};

    fn request_parts() -> (Topic, Vec<Row>) {
        let topic = Topic::new("t", "Peak Traffic Hours", IntentTemplate::new("{refinement}", "t"), ChartHint::Trend);
        let rows = (8..11)
            .map(|h| {
                let mut row = Row::new();
                row.insert("hour".into(), Scalar::Int(h));
                row.insert("count".into(), Scalar::Int(h * 1_000));
                row
            })
            .collect();
        (topic, rows)
    }

    #[test]
    fn bar_figure_shape() {
        let (topic, rows) = request_parts();
        let encoding = Encoding::from([(Channel::X, "hour".to_string()), (Channel::Y, "count".to_string())]);
        let request = RenderRequest {
            chart_kind: ChartKind::Bar,
            encoding: &encoding,
            rows: &rows,
            topic: &topic,
            style: ChartStyle::Modern,
        };

        let Artifact::Figure(figure) = PrimaryVizBackend::new(true).render(&request).unwrap() else {
            panic!("expected a figure");
        };
        assert_eq!(figure["data"][0]["type"], "bar");
        assert_eq!(figure["data"][0]["x"], json!([8, 9, 10]));
        assert_eq!(figure["layout"]["template"], "plotly_white");
        assert_eq!(figure["layout"]["title"]["text"], "Peak Traffic Hours");
    }

    #[test]
    fn minimal_style_hides_grid() {
        let (topic, rows) = request_parts();
        let encoding = Encoding::from([(Channel::X, "hour".to_string()), (Channel::Y, "count".to_string())]);
        let request = RenderRequest {
            chart_kind: ChartKind::Line,
            encoding: &encoding,
            rows: &rows,
            topic: &topic,
            style: ChartStyle::Minimal,
        };

        let Artifact::Figure(figure) = PrimaryVizBackend::new(true).render(&request).unwrap() else {
            panic!("expected a figure");
        };
        assert_eq!(figure["layout"]["template"], "simple_white");
        assert_eq!(figure["layout"]["xaxis"]["showgrid"], false);
    }

    #[test]
    fn gauge_needs_numeric_value() {
        let (topic, _) = request_parts();
        let mut row = Row::new();
        row.insert("zone".into(), Scalar::from("A"));
        let rows = vec![row];
        let encoding = Encoding::from([(Channel::Value, "zone".to_string())]);
        let request = RenderRequest {
            chart_kind: ChartKind::Gauge,
            encoding: &encoding,
            rows: &rows,
            topic: &topic,
            style: ChartStyle::Classic,
        };
        assert!(matches!(
            PrimaryVizBackend::new(true).render(&request),
            Err(RenderError::NonNumeric { .. })
        ));
    }
}
