//! Text rendering of slides for terminal hosts

use crate::config::DeckConfig;
use deck_model::{Artifact, Slide};
use std::fmt;

/// Which optional sections a [`SlideView`] shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Generated query section
    pub show_query: bool,
    /// Source, badge, request id and fingerprint
    pub show_metadata: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            show_query: true,
            show_metadata: true,
        }
    }
}

impl From<&DeckConfig> for ViewOptions {
    fn from(config: &DeckConfig) -> Self {
        Self {
            show_query: config.enable_sql_display,
            show_metadata: config.show_metadata,
        }
    }
}

/// Displayable slide
#[derive(Debug, Clone, Copy)]
pub struct SlideView<'a> {
    slide: &'a Slide,
    number: usize,
    options: ViewOptions,
}

impl<'a> SlideView<'a> {
    /// View slide `number` (1-based)
    #[must_use]
    pub fn new(slide: &'a Slide, number: usize, options: ViewOptions) -> Self {
        Self {
            slide,
            number,
            options,
        }
    }
}

impl fmt::Display for SlideView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slide = self.slide;
        let insight = slide.insight();
        let result = slide.analysis_result();
        let chart = slide.chart_spec();

        writeln!(f, "Slide {}: {}", self.number, slide.topic().display_name)?;
        writeln!(f, "{}", insight.summary_text)?;

        if !insight.key_metrics.is_empty() {
            writeln!(f)?;
            writeln!(f, "Key metrics")?;
            for metric in &insight.key_metrics {
                writeln!(f, "  {}: {}", metric.label, metric.value)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Chart: {} via {}", chart.chart_kind, chart.backend_used)?;
        if let Artifact::Table(table) = slide.artifact() {
            for line in table.lines() {
                writeln!(f, "  {line}")?;
            }
        }

        if self.options.show_query && !result.generated_query_text.is_empty() {
            writeln!(f)?;
            writeln!(f, "Generated query")?;
            for line in result.generated_query_text.lines() {
                writeln!(f, "  {line}")?;
            }
        }

        if self.options.show_metadata {
            writeln!(f)?;
            writeln!(f, "Metadata")?;
            writeln!(f, "  Source: {}", result.source)?;
            writeln!(f, "  Confidence: {}", result.confidence.badge())?;
            writeln!(f, "  Request ID: {}", result.request_id.as_deref().unwrap_or("N/A"))?;
            writeln!(f, "  Fingerprint: {}", slide.query_request().fingerprint.short())?;
            if let Some(explanation) = &result.explanation {
                writeln!(f, "  Explanation: {explanation}")?;
            }
            if let Some(error) = &result.error {
                writeln!(f, "  Error: {error}")?;
            }
        }
        Ok(())
    }
}
