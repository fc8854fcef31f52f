//! Deck assembly
//!
//! Topics are processed concurrently up to `max_concurrent_topics`; slides
//! come back in request order regardless of completion order.

use crate::config::DeckConfig;
use crate::error::{DeckError, TopicError};
use crate::pipeline::SlidePipeline;
use deck_model::{ResultSource, Slide};
use deck_remote::{ConnectionStatus, RemoteAnalysisClient};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Topic that produced no slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicFailure {
    /// Index in the requested topic list
    pub position: usize,
    /// Requested topic id
    pub topic_id: String,
    /// Cause
    pub error: TopicError,
}

impl fmt::Display for TopicFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}: {}", self.position + 1, self.topic_id, self.error)
    }
}

/// Generated slides plus per-topic failures
#[derive(Debug, Clone, Default)]
pub struct Deck {
    /// Slides in request order
    pub slides: Vec<Slide>,
    /// Topics that failed, in request order
    pub failures: Vec<TopicFailure>,
}

impl Deck {
    /// Check if every requested topic produced a slide
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of slides
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Check if there are no slides
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Aggregate figures for the deck
    #[must_use]
    pub fn summary(&self) -> DeckSummary {
        DeckSummary::from_slides(&self.slides)
    }
}

/// Aggregate figures shown after generation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DeckSummary {
    /// Slides generated
    pub slides_generated: usize,
    /// Rows across all slides
    pub data_points: usize,
    /// Mean confidence, 0 for an empty deck
    pub average_confidence: f64,
    /// Slides built from demo data
    pub fallback_slides: usize,
}

impl DeckSummary {
    /// Summarize slides
    #[must_use]
    pub fn from_slides(slides: &[Slide]) -> Self {
        let data_points = slides.iter().map(|s| s.analysis_result().row_count()).sum();
        let fallback_slides = slides
            .iter()
            .filter(|s| s.analysis_result().source == ResultSource::Fallback)
            .count();
        #[allow(clippy::cast_precision_loss)]
        let average_confidence = if slides.is_empty() {
            0.0
        } else {
            slides
                .iter()
                .map(|s| s.analysis_result().confidence.value())
                .sum::<f64>()
                / slides.len() as f64
        };
        Self {
            slides_generated: slides.len(),
            data_points,
            average_confidence,
            fallback_slides,
        }
    }
}

impl fmt::Display for DeckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Slides Generated: {} | Data Points Analyzed: {} | Average Confidence: {:.0}%",
            self.slides_generated,
            self.data_points,
            self.average_confidence * 100.0
        )?;
        if self.fallback_slides > 0 {
            write!(f, " | Demo Data Slides: {}", self.fallback_slides)?;
        }
        Ok(())
    }
}

/// Generates decks from topic selections
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    pipeline: Arc<SlidePipeline>,
    max_concurrent: usize,
}

impl DeckBuilder {
    /// Create builder following `config`
    ///
    /// # Errors
    /// - `DeckError::Config` if the configuration is invalid
    /// - `DeckError::RemoteSetup` if the remote client cannot be built
    pub fn new(config: &DeckConfig) -> Result<Self, DeckError> {
        let pipeline = SlidePipeline::from_config(config)?;
        Ok(Self::with_pipeline(pipeline, config.max_concurrent_topics))
    }

    /// Create builder with an explicit remote client
    #[must_use]
    pub fn with_client(config: &DeckConfig, client: RemoteAnalysisClient) -> Self {
        Self::with_pipeline(SlidePipeline::new(config, client), config.max_concurrent_topics)
    }

    /// Create builder over an existing pipeline
    #[must_use]
    pub fn with_pipeline(pipeline: SlidePipeline, max_concurrent: usize) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Underlying pipeline
    #[inline]
    #[must_use]
    pub fn pipeline(&self) -> &SlidePipeline {
        &self.pipeline
    }

    /// Check the remote service
    pub async fn check_connection(&self) -> ConnectionStatus {
        self.pipeline.client().check_connection().await
    }

    /// Build one slide
    ///
    /// # Errors
    /// - `DeckError::Topic` if the topic is unknown or its refinement is invalid
    pub async fn generate_slide(&self, topic_id: &str, refinement: Option<&str>) -> Result<Slide, DeckError> {
        self.pipeline
            .build_slide(topic_id, refinement)
            .await
            .map_err(|e| DeckError::topic(topic_id, e))
    }

    /// Build a deck
    ///
    /// `refinements` is keyed by topic id. A failing topic is recorded in
    /// [`Deck::failures`] and does not stop the others.
    pub async fn generate_deck<S: AsRef<str>>(
        &self,
        topic_ids: &[S],
        refinements: &BTreeMap<String, String>,
    ) -> Deck {
        tracing::info!("Generating deck for {} topics", topic_ids.len());

        let mut outcomes: Vec<(usize, &str, Result<Slide, TopicError>)> =
            stream::iter(topic_ids.iter().map(|id: &S| id.as_ref()).enumerate())
                .map(|(position, topic_id)| {
                    let refinement = refinements.get(topic_id).map(String::as_str);
                    async move {
                        let outcome = self.pipeline.build_slide(topic_id, refinement).await;
                        (position, topic_id, outcome)
                    }
                })
                .buffer_unordered(self.max_concurrent)
                .collect()
                .await;
        outcomes.sort_by_key(|(position, _, _)| *position);

        let mut deck = Deck::default();
        for (position, topic_id, outcome) in outcomes {
            match outcome {
                Ok(slide) => deck.slides.push(slide),
                Err(error) => {
                    tracing::warn!("Skipping topic {}: {}", topic_id, error);
                    deck.failures.push(TopicFailure {
                        position,
                        topic_id: topic_id.to_string(),
                        error,
                    });
                }
            }
        }

        tracing::info!(
            "Deck generated: {} slides, {} failures",
            deck.slides.len(),
            deck.failures.len()
        );
        deck
    }

    /// Build a deck unless `cancel` resolves first
    ///
    /// In-flight topics are dropped on cancellation; no partial deck is
    /// returned.
    ///
    /// # Errors
    /// - `DeckError::Cancelled` if `cancel` completed first
    pub async fn generate_deck_until<S, C>(
        &self,
        topic_ids: &[S],
        refinements: &BTreeMap<String, String>,
        cancel: C,
    ) -> Result<Deck, DeckError>
    where
        S: AsRef<str>,
        C: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            () = cancel => {
                tracing::info!("Deck generation cancelled");
                Err(DeckError::Cancelled)
            }
            deck = self.generate_deck(topic_ids, refinements) => Ok(deck),
        }
    }
}
