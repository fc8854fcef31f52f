//! Declarative grammar backend
//!
//! Emits a Vega-Lite v5 specification with inline data. Has no gauge.

use crate::backend::{RenderBackend, RenderError, RenderRequest};
use crate::style::theme;
use deck_model::{Artifact, BackendKind, ChartKind, Channel};
use serde_json::{json, Value};

const SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// `SECONDARY_VIZ` tier
#[derive(Debug, Clone, Copy)]
pub struct SecondaryVizBackend {
    available: bool,
}

impl SecondaryVizBackend {
    /// Create backend
    #[inline]
    #[must_use]
    pub const fn new(available: bool) -> Self {
        Self { available }
    }

    fn mark_and_encoding(request: &RenderRequest<'_>) -> Result<(Value, Value), RenderError> {
        match request.chart_kind {
            ChartKind::Bar | ChartKind::Line => {
                let x = request.channel(Channel::X)?;
                let y = request.channel(Channel::Y)?;
                let mark = if request.chart_kind == ChartKind::Bar {
                    json!({"type": "bar", "tooltip": true})
                } else {
                    json!({"type": "line", "point": true, "tooltip": true})
                };
                let encoding = json!({
                    "x": {"field": x, "type": "ordinal", "title": request.label(x)},
                    "y": {"field": y, "type": "quantitative", "title": request.label(y)},
                    "tooltip": [{"field": x}, {"field": y}],
                });
                Ok((mark, encoding))
            }
            ChartKind::Pie => {
                let label = request.channel(Channel::Label)?;
                let value = request.channel(Channel::Value)?;
                let encoding = json!({
                    "theta": {"field": value, "type": "quantitative", "title": request.label(value)},
                    "color": {"field": label, "type": "nominal", "title": request.label(label)},
                    "tooltip": [{"field": label}, {"field": value}],
                });
                Ok((json!({"type": "arc", "tooltip": true}), encoding))
            }
            chart @ (ChartKind::Gauge | ChartKind::Table) => Err(RenderError::Unsupported {
                backend: BackendKind::SecondaryViz,
                chart,
            }),
        }
    }
}

impl RenderBackend for SecondaryVizBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::SecondaryViz
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn supports(&self, chart: ChartKind) -> bool {
        matches!(chart, ChartKind::Bar | ChartKind::Pie | ChartKind::Line)
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<Artifact, RenderError> {
        let (mark, encoding) = Self::mark_and_encoding(request)?;
        let theme = theme(request.style);
        Ok(Artifact::Figure(json!({
            "$schema": SCHEMA,
            "title": request.title(),
            "width": 600,
            "height": 400,
            "data": {"values": request.records()},
            "mark": mark,
            "encoding": encoding,
            "config": {
                "range": {"category": theme.palette},
                "axis": {"grid": theme.grid},
                "title": {"color": theme.title_color},
            },
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_model::{ChartHint, ChartStyle, Encoding, IntentTemplate, Row, Scalar, Topic};

    #[test]
    fn pie_uses_arc_mark() {
        let topic = Topic::new("t", "Speed Distribution", IntentTemplate::new("{refinement}", "t"), ChartHint::Distribution);
        let rows: Vec<Row> = ["0-20 mph", "21-40 mph"]
            .iter()
            .map(|r| {
                let mut row = Row::new();
                row.insert("speed_range".into(), Scalar::from(*r));
                row.insert("vehicle_count".into(), Scalar::Int(100));
                row
            })
            .collect();
        let encoding = Encoding::from([
            (Channel::Label, "speed_range".to_string()),
            (Channel::Value, "vehicle_count".to_string()),
        ]);
        let request = RenderRequest {
            chart_kind: ChartKind::Pie,
            encoding: &encoding,
            rows: &rows,
            topic: &topic,
            style: ChartStyle::Modern,
        };

        let Artifact::Figure(spec) = SecondaryVizBackend::new(true).render(&request).unwrap() else {
            panic!("expected a figure");
        };
        assert_eq!(spec["mark"]["type"], "arc");
        assert_eq!(spec["encoding"]["theta"]["field"], "vehicle_count");
        assert_eq!(spec["data"]["values"][1]["speed_range"], "21-40 mph");
    }

    #[test]
    fn gauge_unsupported() {
        let backend = SecondaryVizBackend::new(true);
        assert!(!backend.supports(ChartKind::Gauge));
        assert!(backend.supports(ChartKind::Pie));
    }
}
