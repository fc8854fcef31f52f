//! Per-topic slide pipeline
//!
//! resolve → cached remote analysis → fallback → synthesize → visualize.
//! Only catalog and resolution failures escape; every later failure is
//! absorbed and recorded on the slide.

use crate::cache::ResultCache;
use crate::config::DeckConfig;
use crate::error::{DeckError, TopicError};
use deck_catalog::{QueryResolver, TopicCatalog};
use deck_insight::synthesize;
use deck_model::{AnalysisResult, Insight, QueryRequest, Slide, Topic};
use deck_remote::{FallbackDataProvider, HttpAnalysisService, RemoteAnalysisClient};
use deck_viz::{Capabilities, VisualizationSelector};
use std::sync::Arc;

/// Builds one [`Slide`] per topic
#[derive(Debug)]
pub struct SlidePipeline {
    catalog: Arc<TopicCatalog>,
    resolver: QueryResolver,
    client: RemoteAnalysisClient,
    fallback: FallbackDataProvider,
    selector: VisualizationSelector,
    cache: ResultCache,
}

impl SlidePipeline {
    /// Create a pipeline over the built-in catalog
    #[must_use]
    pub fn new(config: &DeckConfig, client: RemoteAnalysisClient) -> Self {
        let capabilities = Capabilities::detect(&config.backends);
        tracing::debug!(
            "Rendering backends available: {:?}",
            capabilities.iter().collect::<Vec<_>>()
        );
        Self {
            catalog: TopicCatalog::shared(),
            resolver: QueryResolver::new(),
            client,
            fallback: FallbackDataProvider::new(),
            selector: VisualizationSelector::new(&capabilities, config.chart_style),
            cache: ResultCache::new(),
        }
    }

    /// Create a pipeline whose remote client follows `config.remote`
    ///
    /// # Errors
    /// - `DeckError::Config` if the configuration is invalid
    /// - `DeckError::RemoteSetup` if the HTTP client cannot be built
    pub fn from_config(config: &DeckConfig) -> Result<Self, DeckError> {
        config.validate()?;
        let timeout = config.remote_timeout()?;
        let client = match (&config.remote.endpoint, config.remote.enabled) {
            (Some(endpoint), true) => {
                let service = HttpAnalysisService::new(endpoint.as_str(), timeout)
                    .map_err(|e| DeckError::RemoteSetup(e.to_string()))?;
                RemoteAnalysisClient::new(Arc::new(service), true)
                    .with_timeout(timeout)
                    .with_semantic_model(config.remote.semantic_model.as_str())
            }
            _ => RemoteAnalysisClient::disabled(),
        };
        Ok(Self::new(config, client))
    }

    /// Replace the topic catalog
    #[must_use]
    pub fn with_catalog(mut self, catalog: TopicCatalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Replace the query resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: QueryResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the visualization selector
    #[must_use]
    pub fn with_selector(mut self, selector: VisualizationSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Topic catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    /// Remote client
    #[inline]
    #[must_use]
    pub fn client(&self) -> &RemoteAnalysisClient {
        &self.client
    }

    /// Result cache
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Build the slide for one topic
    ///
    /// # Errors
    /// - `TopicError::Catalog` if the id is unknown
    /// - `TopicError::Resolve` if the refinement is rejected
    pub async fn build_slide(&self, topic_id: &str, refinement: Option<&str>) -> Result<Slide, TopicError> {
        let topic = self.catalog.get_topic(topic_id)?;
        let request = self.resolver.resolve(&topic, refinement)?;
        tracing::info!(
            "Building slide for {} [{}]",
            topic.display_name,
            request.fingerprint.short()
        );

        let result = self.analyze(&topic, &request).await;

        let insight = synthesize(&result, &topic).unwrap_or_else(|err| {
            tracing::warn!("Insight synthesis failed for {}: {}", topic.id, err);
            Insight::no_data(&topic.display_name, result.confidence)
        });

        let (chart_spec, artifact) = self.selector.visualize(&result.rows, &topic);
        tracing::debug!(
            "Slide for {}: {} rows, {} via {}, {}",
            topic.id,
            result.row_count(),
            chart_spec.chart_kind,
            chart_spec.backend_used,
            result.source
        );

        Ok(Slide::new(topic, insight, chart_spec, artifact, request, result))
    }

    /// Remote result for the request, or demo data when the service fails
    async fn analyze(&self, topic: &Topic, request: &QueryRequest) -> Arc<AnalysisResult> {
        if let Some(hit) = self.cache.get(&request.fingerprint).await {
            tracing::debug!("Cache hit for {} [{}]", topic.id, request.fingerprint.short());
            return hit;
        }

        match self
            .cache
            .get_or_try_fetch(request.fingerprint, self.client.try_execute(request))
            .await
        {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(
                    "Remote analysis failed for {}, using demo data: {}",
                    topic.id,
                    err
                );
                let mut fallback = self.fallback.generate(topic);
                if fallback.error.is_none() {
                    fallback = fallback.with_error(err.to_descriptor());
                }
                Arc::new(fallback)
            }
        }
    }
}
