//! Deck export
//!
//! A deck is exported as a JSON array, one record per slide in deck order.

use crate::error::DeckError;
use deck_model::{ChartKind, KeyMetric, Slide};
use serde::{Deserialize, Serialize};

/// Exported form of one slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// Topic display name
    pub topic: String,
    /// Insight summary
    pub summary_text: String,
    /// Insight key metrics, in order
    pub key_metrics: Vec<KeyMetric>,
    /// Query text generated by the service, or the demo marker
    pub generated_query_text: String,
    /// Result confidence
    pub confidence: f64,
    /// Selected chart family
    pub chart_kind: ChartKind,
}

impl From<&Slide> for SlideRecord {
    fn from(slide: &Slide) -> Self {
        let insight = slide.insight();
        let result = slide.analysis_result();
        Self {
            topic: slide.topic().display_name.clone(),
            summary_text: insight.summary_text.clone(),
            key_metrics: insight.key_metrics.clone(),
            generated_query_text: result.generated_query_text.clone(),
            confidence: result.confidence.value(),
            chart_kind: slide.chart_spec().chart_kind,
        }
    }
}

/// Serialize slides to a pretty-printed JSON array
///
/// Display options do not apply; every field is always exported.
///
/// # Errors
/// Returns `DeckError::Export` if serialization fails
pub fn export_deck(slides: &[Slide]) -> Result<Vec<u8>, DeckError> {
    let records: Vec<SlideRecord> = slides.iter().map(SlideRecord::from).collect();
    tracing::debug!("Exporting {} slides", records.len());
    Ok(serde_json::to_vec_pretty(&records)?)
}
