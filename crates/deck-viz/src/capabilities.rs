//! Startup capability detection

use deck_model::BackendKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Backend switches from configuration (`[backends]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendFlags {
    /// Allow the interactive figure backend
    pub primary_viz: bool,
    /// Allow the declarative grammar backend
    pub secondary_viz: bool,
    /// Allow host built-in widgets
    pub native_widget: bool,
}

impl Default for BackendFlags {
    fn default() -> Self {
        Self {
            primary_viz: true,
            secondary_viz: true,
            native_widget: true,
        }
    }
}

/// Backends usable in this process, resolved once
///
/// `PLAIN_TABLE` is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    available: BTreeSet<BackendKind>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect(&BackendFlags::default())
    }
}

impl Capabilities {
    /// Combine compiled-in features with configuration flags
    #[must_use]
    pub fn detect(flags: &BackendFlags) -> Self {
        let mut available = BTreeSet::from([BackendKind::PlainTable]);
        if cfg!(feature = "primary-viz") && flags.primary_viz {
            available.insert(BackendKind::PrimaryViz);
        }
        if cfg!(feature = "secondary-viz") && flags.secondary_viz {
            available.insert(BackendKind::SecondaryViz);
        }
        if flags.native_widget {
            available.insert(BackendKind::NativeWidget);
        }

        tracing::debug!("Rendering backends available: {:?}", available);
        Self { available }
    }

    /// Only the plain text table
    #[must_use]
    pub fn table_only() -> Self {
        Self {
            available: BTreeSet::from([BackendKind::PlainTable]),
        }
    }

    /// Exactly the given backends, plus the plain table
    #[must_use]
    pub fn only(kinds: impl IntoIterator<Item = BackendKind>) -> Self {
        let mut available: BTreeSet<BackendKind> = kinds.into_iter().collect();
        available.insert(BackendKind::PlainTable);
        Self { available }
    }

    /// Check if a backend may be used
    #[inline]
    #[must_use]
    pub fn is_available(&self, kind: BackendKind) -> bool {
        self.available.contains(&kind)
    }

    /// Available backends in priority order
    pub fn iter(&self) -> impl Iterator<Item = BackendKind> + '_ {
        self.available.iter().copied()
    }
}
