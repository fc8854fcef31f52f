//! Query resolution
//!
//! A refinement is free text spliced into the topic's intent template.
//! Column references are written `@column` and must name a column the
//! topic declares; they render as the bare column name.

use crate::error::ResolveError;
use deck_model::{Parameters, QueryRequest, Topic};
use std::collections::BTreeSet;

/// Parameter key carrying the trimmed refinement text
pub const PARAM_REFINEMENT: &str = "refinement";

/// Parameter key carrying the sorted, comma-joined referenced columns
pub const PARAM_COLUMNS: &str = "columns";

/// Marker introducing a column reference
const COLUMN_SIGIL: char = '@';

/// Builds [`QueryRequest`]s from topics and optional refinements
#[derive(Debug, Clone, Copy)]
pub struct QueryResolver {
    max_refinement_chars: usize,
}

impl Default for QueryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryResolver {
    /// Default upper bound on refinement length, in characters
    pub const DEFAULT_MAX_REFINEMENT_CHARS: usize = 500;

    /// Create resolver with default limits
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_refinement_chars: Self::DEFAULT_MAX_REFINEMENT_CHARS,
        }
    }

    /// Set maximum refinement length
    #[inline]
    #[must_use]
    pub const fn with_max_refinement_chars(mut self, max: usize) -> Self {
        self.max_refinement_chars = max;
        self
    }

    /// Resolve a topic into a concrete query request
    ///
    /// A blank refinement is treated as absent.
    ///
    /// # Errors
    /// - `ResolveError::InvalidRefinement` if the refinement is too long,
    ///   contains control characters, or references an undeclared column
    pub fn resolve(&self, topic: &Topic, refinement: Option<&str>) -> Result<QueryRequest, ResolveError> {
        let refinement = refinement.map(str::trim).filter(|r| !r.is_empty());

        let Some(text) = refinement else {
            let request = QueryRequest::new(topic, topic.intent_template.render(None), Parameters::new());
            tracing::debug!(
                "Resolved {} with default phrasing [{}]",
                topic.id,
                request.fingerprint.short()
            );
            return Ok(request);
        };

        self.validate(topic, text)?;
        let (rendered, columns) = expand_column_refs(topic, text)?;

        let mut parameters = Parameters::new();
        parameters.insert(PARAM_REFINEMENT.to_string(), text.to_string());
        if !columns.is_empty() {
            let joined = columns.into_iter().collect::<Vec<_>>().join(",");
            parameters.insert(PARAM_COLUMNS.to_string(), joined);
        }

        let request = QueryRequest::new(topic, topic.intent_template.render(Some(&rendered)), parameters);
        tracing::debug!(
            "Resolved {} with refinement [{}]",
            topic.id,
            request.fingerprint.short()
        );
        Ok(request)
    }

    fn validate(&self, topic: &Topic, text: &str) -> Result<(), ResolveError> {
        let len = text.chars().count();
        if len > self.max_refinement_chars {
            return Err(ResolveError::invalid(
                &topic.id,
                format!(
                    "refinement is {len} characters, limit is {}",
                    self.max_refinement_chars
                ),
            ));
        }
        if let Some(c) = text.chars().find(|c| c.is_control()) {
            return Err(ResolveError::invalid(
                &topic.id,
                format!("refinement contains control character {:?}", c),
            ));
        }
        Ok(())
    }
}

/// Replace `@column` references with bare names, collecting them
///
/// A sigil not followed by an identifier character is kept literally.
fn expand_column_refs(topic: &Topic, text: &str) -> Result<(String, BTreeSet<String>), ResolveError> {
    let mut rendered = String::with_capacity(text.len());
    let mut columns = BTreeSet::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != COLUMN_SIGIL {
            rendered.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                name.push(next.to_ascii_lowercase());
                chars.next();
            } else {
                break;
            }
        }

        if name.is_empty() {
            rendered.push(COLUMN_SIGIL);
            continue;
        }

        if !topic.exposes(&name) {
            return Err(ResolveError::invalid(
                &topic.id,
                format!(
                    "column `{name}` is not exposed; expected one of: {}",
                    topic.column_names().join(", ")
                ),
            ));
        }

        rendered.push_str(&name);
        columns.insert(name);
    }

    Ok((rendered, columns))
}
