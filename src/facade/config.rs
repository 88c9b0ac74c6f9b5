use crate::core::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// How the engine instantiates host-supplied types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStrategy {
    /// Zero-argument construction.
    #[default]
    Default,
    /// Host-registered providers.
    Container,
}

impl fmt::Display for ArtifactStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Container => write!(f, "container"),
        }
    }
}

impl FromStr for ArtifactStrategy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(Self::Default),
            "container" => Ok(Self::Container),
            other => Err(EngineError::Configuration(format!(
                "Unknown artifact strategy '{}'",
                other
            ))),
        }
    }
}

/// Engine configuration
///
/// Build it in code with the chained setters or load it from JSON:
///
/// ```
/// use bpm_query_core::EngineConfig;
///
/// let config = EngineConfig::from_json_str(
///     r#"{ "statement_timeout_ms": 2000, "artifact_strategy": "container" }"#,
/// ).unwrap();
/// assert_eq!(config.statement_timeout().unwrap().as_millis(), 2000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Upper bound for one command, native queries included. `None` disables it.
    pub statement_timeout_ms: Option<u64>,

    pub artifact_strategy: ArtifactStrategy,

    /// Whether the container strategy falls back to default construction
    /// for types it has no provider for.
    pub container_fallback: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            statement_timeout_ms: None,
            artifact_strategy: ArtifactStrategy::Default,
            container_fallback: true,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sub-millisecond remainders round up, so any positive duration stays positive.
    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        let mut millis = timeout.as_millis();
        if timeout.subsec_nanos() % 1_000_000 != 0 {
            millis += 1;
        }
        self.statement_timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    pub fn artifact_strategy(mut self, strategy: ArtifactStrategy) -> Self {
        self.artifact_strategy = strategy;
        self
    }

    pub fn container_fallback(mut self, enabled: bool) -> Self {
        self.container_fallback = enabled;
        self
    }

    pub fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<()> {
        if self.statement_timeout_ms == Some(0) {
            return Err(EngineError::Configuration(
                "statement_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| EngineError::Configuration(format!("Invalid engine config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }
}
