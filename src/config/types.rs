//! Configuration type definitions.

use crate::cli::OutputFormat;
use crate::report::{AssemblyPolicy, LabelMap, VoteThreshold};
use crate::source::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Main configuration structure for apk-trust.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis backend connection.
    pub source: SourceConfig,
    /// Verdict policy.
    pub verdict: VerdictConfig,
    /// Output preferences.
    pub output: OutputConfig,
}

impl Config {
    /// Policy handed to the trust report assembler.
    pub fn assembly_policy(&self) -> AssemblyPolicy {
        AssemblyPolicy::default()
            .with_threshold(self.verdict.threshold)
            .with_labels(self.verdict.safe_labels.clone())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "source.base_url",
                message: "must not be empty".to_string(),
            });
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "source.timeout_secs",
                message: "must be at least 1".to_string(),
            });
        }
        if self.verdict.safe_labels.safe_labels().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "verdict.safe_labels",
                message: "at least one safe label is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Analysis backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Backend base URL, e.g. "http://localhost:5000".
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Verdict policy settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictConfig {
    /// "majority", "legacy", or a fixed number of safe votes.
    pub threshold: VoteThreshold,
    /// Classifier labels that count as a safe vote.
    pub safe_labels: LabelMap,
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "terminal" or "json".
    pub format: Option<OutputFormat>,
}
