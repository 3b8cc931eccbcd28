//! Configuration for metric evaluation
//!
//! A [`MetricsConfig`] can be built in code with [`MetricsConfigBuilder`] or
//! loaded from a TOML, YAML or JSON document. Fields missing from a document
//! take their default values.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when a metric is asked to reduce zero observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyInputPolicy {
    /// Return [`Error::EmptyData`]
    #[default]
    Error,
    /// Return NaN, as a mean or median of nothing
    Nan,
}

/// Configuration shared by the metric functions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Behaviour on zero-length input
    pub empty_input: EmptyInputPolicy,
    /// Minimum number of groups before grouped evaluation goes parallel
    pub parallel_min_groups: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            empty_input: EmptyInputPolicy::default(),
            parallel_min_groups: 8,
        }
    }
}

impl MetricsConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Parse a configuration from YAML text
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a configuration file, choosing the format from its extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let text = match extension.as_deref() {
            Some("toml") | Some("yaml") | Some("yml") | Some("json") => {
                std::fs::read_to_string(path)?
            }
            _ => {
                return Err(Error::InvalidInput(format!(
                    "unsupported configuration file: {}",
                    path.display()
                )))
            }
        };

        let config = match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => Self::from_yaml_str(&text)?,
        };
        log::debug!("Loaded metrics configuration from {}", path.display());
        Ok(config)
    }
}

/// Builder for MetricsConfig
pub struct MetricsConfigBuilder {
    config: MetricsConfig,
}

impl MetricsConfigBuilder {
    pub fn new() -> Self {
        MetricsConfigBuilder {
            config: MetricsConfig::default(),
        }
    }

    pub fn empty_input(mut self, policy: EmptyInputPolicy) -> Self {
        self.config.empty_input = policy;
        self
    }

    pub fn parallel_min_groups(mut self, groups: usize) -> Self {
        self.config.parallel_min_groups = groups;
        self
    }

    pub fn build(self) -> MetricsConfig {
        self.config
    }
}

impl Default for MetricsConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MetricsConfig::default();
        assert_eq!(config.empty_input, EmptyInputPolicy::Error);
        assert_eq!(config.parallel_min_groups, 8);
        assert_eq!(EmptyInputPolicy::default(), EmptyInputPolicy::Error);
        assert_eq!(MetricsConfigBuilder::new().build(), config);
    }

    #[test]
    fn test_builder() {
        let config = MetricsConfigBuilder::new()
            .empty_input(EmptyInputPolicy::Nan)
            .parallel_min_groups(2)
            .build();
        assert_eq!(config.empty_input, EmptyInputPolicy::Nan);
        assert_eq!(config.parallel_min_groups, 2);
    }

    #[test]
    fn test_partial_documents_use_defaults() {
        let config = MetricsConfig::from_toml_str("empty_input = \"nan\"").unwrap();
        assert_eq!(config.empty_input, EmptyInputPolicy::Nan);
        assert_eq!(config.parallel_min_groups, 8);

        let config = MetricsConfig::from_yaml_str("parallel_min_groups: 3").unwrap();
        assert_eq!(config.empty_input, EmptyInputPolicy::Error);
        assert_eq!(config.parallel_min_groups, 3);

        let config = MetricsConfig::from_json_str("{}").unwrap();
        assert_eq!(config, MetricsConfig::default());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = MetricsConfig::from_json_str(r#"{"empty_input": "zero"}"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = MetricsConfig::from_file("metrics.ini");
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
