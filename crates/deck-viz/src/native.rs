//! Host built-in widgets
//!
//! Describes which widget the host should instantiate and with what data.
//! Gauges become a single metric tile; there is no pie widget.

use crate::backend::{RenderBackend, RenderError, RenderRequest};
use deck_model::{Artifact, BackendKind, ChartKind, Channel};
use serde_json::json;

/// `NATIVE_WIDGET` tier
#[derive(Debug, Clone, Copy)]
pub struct NativeWidgetBackend {
    available: bool,
}

impl NativeWidgetBackend {
    /// Create backend
    #[inline]
    #[must_use]
    pub const fn new(available: bool) -> Self {
        Self { available }
    }
}

impl RenderBackend for NativeWidgetBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::NativeWidget
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn supports(&self, chart: ChartKind) -> bool {
        matches!(chart, ChartKind::Bar | ChartKind::Line | ChartKind::Gauge)
    }

    fn render(&self, request: &RenderRequest<'_>) -> Result<Artifact, RenderError> {
        let widget = match request.chart_kind {
            ChartKind::Bar | ChartKind::Line => {
                let x = request.channel(Channel::X)?;
                let y = request.channel(Channel::Y)?;
                let name = if request.chart_kind == ChartKind::Bar {
                    "bar_chart"
                } else {
                    "line_chart"
                };
                json!({
                    "widget": name,
                    "title": request.title(),
                    "x": x,
                    "y": y,
                    "data": request.records(),
                })
            }
            ChartKind::Gauge => {
                let column = request.channel(Channel::Value)?;
                json!({
                    "widget": "metric",
                    "title": request.title(),
                    "label": request.label(column),
                    "value": request.headline(column)?,
                })
            }
            chart @ (ChartKind::Pie | ChartKind::Table) => {
                return Err(RenderError::Unsupported {
                    backend: BackendKind::NativeWidget,
                    chart,
                })
            }
        };
        Ok(Artifact::Figure(widget))
    }
}
