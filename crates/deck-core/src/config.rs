//! Deck configuration
//!
//! ```toml
//! enable_sql_display = true
//! show_metadata = true
//! chart_style = "modern"
//! max_concurrent_topics = 4
//! default_topics = ["traffic_overview", "peak_traffic_hours"]
//!
//! [remote]
//! enabled = true
//! endpoint = "https://analyst.example.com/api/v2/cortex/analyst/message"
//! semantic_model = "@DEMO.DEMO.SEMANTIC_MODELS/TRAFFIC.yaml"
//! timeout_seconds = 30.0
//!
//! [backends]
//! primary_viz = true
//! secondary_viz = true
//! native_widget = true
//! ```

use deck_model::ChartStyle;
use deck_remote::client::DEFAULT_SEMANTIC_MODEL;
use deck_viz::BackendFlags;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for this schema
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values are inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Remote analysis service settings (`[remote]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Attempt remote analysis at all
    pub enabled: bool,
    /// Service URL
    pub endpoint: Option<String>,
    /// Semantic model the service resolves against
    pub semantic_model: String,
    /// Per-call bound in seconds
    pub timeout_seconds: f64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            semantic_model: DEFAULT_SEMANTIC_MODEL.to_string(),
            timeout_seconds: 30.0,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Show the generated query on slides
    pub enable_sql_display: bool,
    /// Show source, confidence badge, request id and fingerprint
    pub show_metadata: bool,
    /// Figure template
    pub chart_style: ChartStyle,
    /// Topics resolved at once
    pub max_concurrent_topics: usize,
    /// Topics used when the host selects none
    pub default_topics: Vec<String>,
    /// Remote service
    pub remote: RemoteConfig,
    /// Rendering backend switches
    pub backends: BackendFlags,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            enable_sql_display: true,
            show_metadata: true,
            chart_style: ChartStyle::Modern,
            max_concurrent_topics: 4,
            default_topics: vec![
                "traffic_overview".to_string(),
                "peak_traffic_hours".to_string(),
                "speed_distribution".to_string(),
            ],
            remote: RemoteConfig::default(),
            backends: BackendFlags::default(),
        }
    }
}

impl DeckConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// Returns `Parse` for malformed TOML and `Invalid` for bad values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges and cross-field consistency
    ///
    /// # Errors
    /// Returns `Invalid` describing the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.remote_timeout()?;
        if self.max_concurrent_topics == 0 {
            return Err(ConfigError::Invalid(
                "max_concurrent_topics must be at least 1".into(),
            ));
        }
        if self.remote.enabled
            && self.remote.endpoint.as_deref().map_or(true, |e| e.trim().is_empty())
        {
            return Err(ConfigError::Invalid(
                "remote.enabled requires remote.endpoint".into(),
            ));
        }
        Ok(())
    }

    /// Per-call remote bound
    ///
    /// # Errors
    /// Returns `Invalid` unless the timeout is a positive number of seconds
    /// that fits a `Duration`
    pub fn remote_timeout(&self) -> Result<Duration, ConfigError> {
        let timeout = self.remote.timeout_seconds;
        if !timeout.is_finite() || timeout <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "remote.timeout_seconds must be a positive number, got {timeout}"
            )));
        }
        Duration::try_from_secs_f64(timeout).map_err(|err| {
            ConfigError::Invalid(format!("remote.timeout_seconds {timeout} is out of range: {err}"))
        })
    }

    /// With SQL display toggle
    #[inline]
    #[must_use]
    pub fn with_sql_display(mut self, enabled: bool) -> Self {
        self.enable_sql_display = enabled;
        self
    }

    /// With metadata toggle
    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, enabled: bool) -> Self {
        self.show_metadata = enabled;
        self
    }

    /// With chart style
    #[inline]
    #[must_use]
    pub fn with_chart_style(mut self, style: ChartStyle) -> Self {
        self.chart_style = style;
        self
    }

    /// With concurrency bound
    #[inline]
    #[must_use]
    pub fn with_max_concurrent_topics(mut self, max: usize) -> Self {
        self.max_concurrent_topics = max;
        self
    }

    /// With remote timeout in seconds
    #[inline]
    #[must_use]
    pub fn with_remote_timeout_seconds(mut self, seconds: f64) -> Self {
        self.remote.timeout_seconds = seconds;
        self
    }

    /// With remote service enabled at `endpoint`
    #[must_use]
    pub fn with_remote_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.remote.enabled = true;
        self.remote.endpoint = Some(endpoint.into());
        self
    }

    /// Disable the remote service (demo mode)
    #[inline]
    #[must_use]
    pub fn offline(mut self) -> Self {
        self.remote.enabled = false;
        self
    }

    /// With backend switches
    #[inline]
    #[must_use]
    pub fn with_backends(mut self, backends: BackendFlags) -> Self {
        self.backends = backends;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_valid() {
        let config = DeckConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.enable_sql_display);
        assert!(config.show_metadata);
        assert!(!config.remote.enabled);
        assert_eq!(config.remote.semantic_model, "@DEMO.DEMO.SEMANTIC_MODELS/TRAFFIC.yaml");
        assert_eq!(config.remote_timeout().unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn parse_partial_toml() {
        let config = DeckConfig::from_toml_str(
            r#"
            chart_style = "minimal"
            enable_sql_display = false

            [remote]
            enabled = true
            endpoint = "http://localhost:9000/analyze"
            timeout_seconds = 2.5

            [backends]
            primary_viz = false
            "#,
        )
        .unwrap();

        assert_eq!(config.chart_style, ChartStyle::Minimal);
        assert!(!config.enable_sql_display);
        assert!(config.show_metadata);
        assert_eq!(config.remote_timeout().unwrap(), Duration::from_millis(2_500));
        assert!(!config.backends.primary_viz);
        assert!(config.backends.secondary_viz);
    }

    #[test]
    fn rejects_bad_values() {
        let cases = [
            "[remote]\ntimeout_seconds = 0.0",
            "[remote]\ntimeout_seconds = -3.0",
            "[remote]\ntimeout_seconds = 1e20",
            "[remote]\nenabled = true\nendpoint = \"http://localhost:9000\"\ntimeout_seconds = 1e20",
            "max_concurrent_topics = 0",
            "[remote]\nenabled = true",
            "[remote]\nenabled = true\nendpoint = \"  \"",
        ];
        for text in cases {
            assert!(
                matches!(DeckConfig::from_toml_str(text), Err(ConfigError::Invalid(_))),
                "{text}"
            );
        }
        assert!(!DeckConfig::default().with_remote_timeout_seconds(f64::NAN).validate().is_ok());
    }

    #[test]
    fn oversized_timeout_is_an_error() {
        let config = DeckConfig::default().with_remote_timeout_seconds(1e20);
        assert!(matches!(config.remote_timeout(), Err(ConfigError::Invalid(_))));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_unknown_style() {
        assert!(matches!(
            DeckConfig::from_toml_str("chart_style = \"neon\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.toml");
        std::fs::write(&path, "max_concurrent_topics = 2\n").unwrap();

        let config = DeckConfig::load(&path).unwrap();
        assert_eq!(config.max_concurrent_topics, 2);

        let missing = DeckConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
