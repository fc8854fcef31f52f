//! Topic registry
//!
//! Static data, built once and never mutated. Topics are handed out as
//! `Arc<Topic>` so slides can hold on to them without copying schemas.

use crate::error::CatalogError;
use crate::traffic;
use deck_model::Topic;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Ordered, read-only topic registry
#[derive(Debug, Clone, Default)]
pub struct TopicCatalog {
    topics: Vec<Arc<Topic>>,
    index: HashMap<String, usize>,
}

impl TopicCatalog {
    /// Build a catalog, preserving topic order
    ///
    /// # Errors
    /// - `CatalogError::DuplicateTopic` if two topics share an id
    pub fn new(topics: impl IntoIterator<Item = Topic>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for topic in topics {
            if catalog.index.contains_key(&topic.id) {
                return Err(CatalogError::DuplicateTopic(topic.id));
            }
            catalog.index.insert(topic.id.clone(), catalog.topics.len());
            catalog.topics.push(Arc::new(topic));
        }
        Ok(catalog)
    }

    /// Built-in traffic dataset catalog, initialized on first use
    #[must_use]
    pub fn builtin() -> &'static Self {
        builtin_arc()
    }

    /// Handle to the built-in catalog; every call returns the same instance
    #[inline]
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(builtin_arc())
    }

    /// All topics in catalog order
    #[inline]
    #[must_use]
    pub fn list_topics(&self) -> &[Arc<Topic>] {
        &self.topics
    }

    /// Look up a topic by id
    ///
    /// # Errors
    /// - `CatalogError::UnknownTopic` if no topic has this id
    pub fn get_topic(&self, id: &str) -> Result<Arc<Topic>, CatalogError> {
        self.index
            .get(id)
            .map(|&idx| Arc::clone(&self.topics[idx]))
            .ok_or_else(|| CatalogError::UnknownTopic(id.to_string()))
    }

    /// Case-insensitive lookup by human title
    #[must_use]
    pub fn find_by_display_name(&self, name: &str) -> Option<Arc<Topic>> {
        let needle = name.trim();
        self.topics
            .iter()
            .find(|t| t.display_name.eq_ignore_ascii_case(needle))
            .cloned()
    }

    /// Resolve either an id or a display name
    ///
    /// # Errors
    /// - `CatalogError::UnknownTopic` if neither matches
    pub fn lookup(&self, id_or_name: &str) -> Result<Arc<Topic>, CatalogError> {
        self.get_topic(id_or_name)
            .or_else(|err| self.find_by_display_name(id_or_name).ok_or(err))
    }

    /// Topic ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().map(|t| t.id.as_str())
    }

    /// Number of topics
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

fn builtin_arc() -> &'static Arc<TopicCatalog> {
    static BUILTIN: OnceLock<Arc<TopicCatalog>> = OnceLock::new();
    BUILTIN.get_or_init(|| {
        let catalog = TopicCatalog::new(traffic::topics()).unwrap_or_else(|err| {
            tracing::error!("built-in topic catalog rejected: {}", err);
            TopicCatalog::default()
        });
        Arc::new(catalog)
    })
}
