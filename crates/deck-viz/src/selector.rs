//! Backend fallback chain

use crate::backend::{RenderBackend, RenderRequest};
use crate::capabilities::Capabilities;
use crate::native::NativeWidgetBackend;
use crate::select::{encode, select_chart_kind};
use crate::table::{render_table, PlainTableBackend};
use deck_model::{Artifact, BackendKind, ChartKind, ChartSpec, ChartStyle, Row, Topic};
use std::fmt;

/// Chooses a chart and renders it with the first backend that can
///
/// The chart kind recorded in the returned [`ChartSpec`] is the one the
/// data called for, even when only the plain table could draw it.
pub struct VisualizationSelector {
    backends: Vec<Box<dyn RenderBackend>>,
    style: ChartStyle,
}

impl fmt::Debug for VisualizationSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<BackendKind> = self.backends.iter().map(|b| b.kind()).collect();
        f.debug_struct("VisualizationSelector")
            .field("backends", &kinds)
            .field("style", &self.style)
            .finish()
    }
}

impl Default for VisualizationSelector {
    fn default() -> Self {
        Self::new(&Capabilities::default(), ChartStyle::default())
    }
}

impl VisualizationSelector {
    /// Build the standard backend chain for the detected capabilities
    #[must_use]
    pub fn new(capabilities: &Capabilities, style: ChartStyle) -> Self {
        let mut backends: Vec<Box<dyn RenderBackend>> = Vec::with_capacity(4);
        #[cfg(feature = "primary-viz")]
        backends.push(Box::new(crate::primary::PrimaryVizBackend::new(
            capabilities.is_available(BackendKind::PrimaryViz),
        )));
        #[cfg(feature = "secondary-viz")]
        backends.push(Box::new(crate::secondary::SecondaryVizBackend::new(
            capabilities.is_available(BackendKind::SecondaryViz),
        )));
        backends.push(Box::new(NativeWidgetBackend::new(
            capabilities.is_available(BackendKind::NativeWidget),
        )));
        backends.push(Box::new(PlainTableBackend));
        Self { backends, style }
    }

    /// Build a chain from explicit backends, ordered by priority
    #[must_use]
    pub fn with_backends(mut backends: Vec<Box<dyn RenderBackend>>, style: ChartStyle) -> Self {
        backends.sort_by_key(|b| b.kind());
        Self { backends, style }
    }

    /// Figure styling preset
    #[inline]
    #[must_use]
    pub fn style(&self) -> ChartStyle {
        self.style
    }

    /// Select a chart for the rows and render it
    ///
    /// Never fails: backends that are unavailable, do not support the
    /// chart, or fail to render are skipped, and the plain table ends the
    /// chain.
    #[must_use]
    pub fn visualize(&self, rows: &[Row], topic: &Topic) -> (ChartSpec, Artifact) {
        let chart_kind = select_chart_kind(rows, topic);
        if chart_kind == ChartKind::Table {
            return (ChartSpec::table(), Artifact::Table(render_table(rows)));
        }

        let encoding = encode(chart_kind, rows, topic);
        let request = RenderRequest {
            chart_kind,
            encoding: &encoding,
            rows,
            topic,
            style: self.style,
        };

        for backend in &self.backends {
            let kind = backend.kind();
            if !backend.is_available() || !backend.supports(chart_kind) {
                tracing::debug!("Skipping {} for {} chart", kind, chart_kind);
                continue;
            }
            match backend.render(&request) {
                Ok(artifact) => {
                    tracing::debug!("Rendered {} chart for {} with {}", chart_kind, topic.id, kind);
                    return (ChartSpec::new(chart_kind, encoding, kind), artifact);
                }
                Err(err) => {
                    tracing::warn!("{} failed to render {}: {}", kind, topic.id, err);
                }
            }
        }

        (
            ChartSpec::new(chart_kind, encoding, BackendKind::PlainTable),
            Artifact::Table(render_table(rows)),
        )
    }
}
