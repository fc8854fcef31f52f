//! Slides

use crate::chart::{Artifact, ChartSpec};
use crate::insight::Insight;
use crate::request::QueryRequest;
use crate::result::AnalysisResult;
use crate::topic::Topic;
use std::sync::Arc;

/// Fully composed output unit for one topic
///
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Slide {
    topic: Arc<Topic>,
    insight: Insight,
    chart_spec: ChartSpec,
    artifact: Artifact,
    query_request: QueryRequest,
    analysis_result: Arc<AnalysisResult>,
}

impl Slide {
    /// Compose a slide
    #[must_use]
    pub fn new(
        topic: Arc<Topic>,
        insight: Insight,
        chart_spec: ChartSpec,
        artifact: Artifact,
        query_request: QueryRequest,
        analysis_result: Arc<AnalysisResult>,
    ) -> Self {
        Self {
            topic,
            insight,
            chart_spec,
            artifact,
            query_request,
            analysis_result,
        }
    }

    /// Topic
    #[inline]
    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    /// Insight
    #[inline]
    #[must_use]
    pub fn insight(&self) -> &Insight {
        &self.insight
    }

    /// Chart spec
    #[inline]
    #[must_use]
    pub fn chart_spec(&self) -> &ChartSpec {
        &self.chart_spec
    }

    /// Rendered chart
    #[inline]
    #[must_use]
    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Request the slide was resolved from
    #[inline]
    #[must_use]
    pub fn query_request(&self) -> &QueryRequest {
        &self.query_request
    }

    /// Underlying analysis result
    #[inline]
    #[must_use]
    pub fn analysis_result(&self) -> &AnalysisResult {
        &self.analysis_result
    }
}
