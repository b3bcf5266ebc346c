//! Comparison settings loaded from TOML.

use serde::{Deserialize, Serialize};

use crate::engine::CompareOptions;
use crate::error::DiffResult;
use crate::filter::KeyFilter;

/// Keys to ignore, as written in configuration: either a list or a single
/// comma-separated string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IgnoreKeys {
    List(Vec<String>),
    Csv(String),
}

impl Default for IgnoreKeys {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl IgnoreKeys {
    /// Validate into a [`KeyFilter`].
    pub fn to_filter(&self) -> DiffResult<KeyFilter> {
        match self {
            Self::List(keys) => KeyFilter::new(keys),
            Self::Csv(list) => KeyFilter::parse_list(list),
        }
    }
}

/// Configuration for a comparison run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Keys excluded from comparison at any depth.
    pub ignore_keys: IgnoreKeys,
}

impl CompareConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> DiffResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validate the configuration into engine options.
    pub fn to_options(&self) -> DiffResult<CompareOptions> {
        Ok(CompareOptions::excluding(self.ignore_keys.to_filter()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiffError;

    #[test]
    fn default_config_excludes_nothing() {
        let options = CompareConfig::default().to_options().unwrap();
        assert!(options.exclude.is_empty());
    }

    #[test]
    fn ignore_keys_as_list() {
        let config = CompareConfig::from_toml_str(r#"ignore_keys = ["timestamp", " version "]"#).unwrap();
        let options = config.to_options().unwrap();
        assert_eq!(
            options.exclude.entries().collect::<Vec<_>>(),
            vec!["timestamp", "version"]
        );
    }

    #[test]
    fn ignore_keys_as_comma_string() {
        let config = CompareConfig::from_toml_str(r#"ignore_keys = "timestamp, version, id""#).unwrap();
        assert_eq!(
            config.ignore_keys,
            IgnoreKeys::Csv("timestamp, version, id".to_string())
        );
        assert_eq!(config.to_options().unwrap().exclude.len(), 3);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = CompareConfig::from_toml_str("").unwrap();
        assert_eq!(config, CompareConfig::default());
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = CompareConfig::from_toml_str("ignore_keys = [").unwrap_err();
        assert!(matches!(err, DiffError::Config(_)));
    }
}
