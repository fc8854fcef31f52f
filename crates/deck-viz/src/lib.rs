//! Deckwright visualization
//!
//! Chart-kind selection is a pure function of the rows and the topic
//! ([`select_chart_kind`]). Rendering walks a fixed priority list of
//! backends and always terminates at the plain text table:
//!
//! 1. `PRIMARY_VIZ`: interactive figure JSON (`primary-viz` feature)
//! 2. `SECONDARY_VIZ`: declarative grammar spec (`secondary-viz` feature)
//! 3. `NATIVE_WIDGET`: host built-in widgets
//! 4. `PLAIN_TABLE`: text table
//!
//! Which of the first three are usable is decided once, at startup, by
//! [`Capabilities::detect`].

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod backend;
pub mod capabilities;
pub mod native;
#[cfg(feature = "primary-viz")]
pub mod primary;
pub mod select;
#[cfg(feature = "secondary-viz")]
pub mod secondary;
pub mod selector;
mod style;
pub mod table;

pub use backend::{RenderBackend, RenderError, RenderRequest};
pub use capabilities::{BackendFlags, Capabilities};
pub use select::{encode, select_chart_kind};
pub use selector::VisualizationSelector;
