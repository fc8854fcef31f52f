//! Deckwright core: topic-to-slide pipeline and deck assembly
//!
//! # Pipeline
//!
//! For each selected topic:
//!
//! 1. **Resolve**: catalog lookup plus optional refinement into a
//!    fingerprinted query request
//! 2. **Analyze**: remote analysis, shared per fingerprint through the
//!    [`ResultCache`]
//! 3. **Fall back**: deterministic demo rows when the service fails
//! 4. **Synthesize**: summary text and key metrics
//! 5. **Visualize**: chart kind, then the first backend that can draw it
//!
//! # Example
//!
//! ```rust,ignore
//! use deck_core::{export_deck, DeckBuilder, DeckConfig};
//!
//! let config = DeckConfig::load("deck.toml")?;
//! let builder = DeckBuilder::new(&config)?;
//! let deck = builder.generate_deck(&config.default_topics, &Default::default()).await;
//! std::fs::write("deck.json", export_deck(&deck.slides)?)?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod cache;
pub mod config;
pub mod deck;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod view;

pub use cache::{CacheStats, ResultCache};
pub use config::{ConfigError, DeckConfig, RemoteConfig};
pub use deck::{Deck, DeckBuilder, DeckSummary, TopicFailure};
pub use error::{DeckError, TopicError};
pub use export::{export_deck, SlideRecord};
pub use pipeline::SlidePipeline;
pub use view::{SlideView, ViewOptions};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
