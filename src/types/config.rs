//! Ranking configuration.

use serde::Deserialize;

use super::error::{IndexError, IndexResult};

/// Maximum number of documents returned by a top-k query.
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are treated as tied.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Tunables for ranking and parallel aggregation.
///
/// Every field has a default, so a TOML document only needs the keys it
/// overrides:
///
/// ```toml
/// max_result_document_count = 10
/// shard_count = 16
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub max_result_document_count: usize,
    pub relevance_epsilon: f64,
    /// Shards in the parallel aggregation map. `None` = available parallelism.
    pub shard_count: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_result_document_count: MAX_RESULT_DOCUMENT_COUNT,
            relevance_epsilon: RELEVANCE_EPSILON,
            shard_count: None,
        }
    }
}

impl SearchConfig {
    /// Parse and validate a TOML config document.
    pub fn from_toml_str(text: &str) -> IndexResult<Self> {
        let config: SearchConfig =
            toml::from_str(text).map_err(|e| IndexError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> IndexResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> IndexResult<()> {
        if !self.relevance_epsilon.is_finite() || self.relevance_epsilon < 0.0 {
            return Err(IndexError::Config(format!(
                "relevance_epsilon must be a non-negative finite number, got {}",
                self.relevance_epsilon
            )));
        }
        if self.shard_count == Some(0) {
            return Err(IndexError::Config("shard_count must be at least 1".into()));
        }
        Ok(())
    }

    /// Shard count to use for the aggregation map.
    pub fn effective_shard_count(&self) -> usize {
        self.shard_count.unwrap_or_else(crate::index::concurrent_map::default_shard_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.max_result_document_count, 5);
        assert_eq!(config.relevance_epsilon, 1e-6);
        assert!(config.shard_count.is_none());
        assert!(config.effective_shard_count() >= 1);
    }

    #[test]
    fn test_partial_toml() {
        let config = SearchConfig::from_toml_str("shard_count = 3").unwrap();
        assert_eq!(config.shard_count, Some(3));
        assert_eq!(config.max_result_document_count, 5);
        assert_eq!(config.effective_shard_count(), 3);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(SearchConfig::from_toml_str("shard_count = 0").is_err());
        assert!(SearchConfig::from_toml_str("relevance_epsilon = -1.0").is_err());
        assert!(SearchConfig::from_toml_str("unknown_key = 1").is_err());
    }
}
