//! Deckwright topic catalog and query resolver
//!
//! - [`TopicCatalog`]: process-wide, read-only registry of analysis topics
//! - [`QueryResolver`]: turns a topic plus an optional refinement into a
//!   fingerprinted [`deck_model::QueryRequest`]
//!
//! # Example
//!
//! ```rust,ignore
//! use deck_catalog::{QueryResolver, TopicCatalog};
//!
//! let topic = TopicCatalog::builtin().get_topic("peak_traffic_hours")?;
//! let request = QueryResolver::new().resolve(&topic, Some("on weekdays by @hour"))?;
//! println!("{} -> {}", request.fingerprint.short(), request.resolved_query_text);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod resolver;
mod traffic;

pub use catalog::TopicCatalog;
pub use error::{CatalogError, ResolveError};
pub use resolver::QueryResolver;
