//! Engine configuration
//!
//! Tuning knobs for expression resolution and migration defaulting. Every
//! field has a serde default so partial JSON configs load cleanly.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};

/// Configuration shared by the resolver, migration and validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of setting lookups a value expression may chain through
    #[serde(default = "default_max_setting_depth")]
    pub max_setting_depth: usize,

    /// Number of triggers a date expression may chain through
    #[serde(default = "default_max_trigger_depth")]
    pub max_trigger_depth: usize,

    /// Capacity of the resolver's numeric-classification cache
    #[serde(default = "default_numeric_cache_capacity")]
    pub numeric_cache_capacity: u64,

    /// strftime format for dates shown in violation messages
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_max_setting_depth() -> usize {
    5
}

fn default_max_trigger_depth() -> usize {
    32
}

fn default_numeric_cache_capacity() -> u64 {
    1024
}

fn default_date_format() -> String {
    "%d %b %Y".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_setting_depth: default_max_setting_depth(),
            max_trigger_depth: default_max_trigger_depth(),
            numeric_cache_capacity: default_numeric_cache_capacity(),
            date_format: default_date_format(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON, filling in defaults for absent fields
    pub fn from_json_str(contents: &str) -> PlanResult<Self> {
        let config: EngineConfig = serde_json::from_str(contents)
            .map_err(|e| PlanError::Config(format!("Failed to parse engine config: {}", e)))?;

        if config.max_setting_depth == 0 {
            return Err(PlanError::Config(
                "max_setting_depth must be at least 1".into(),
            ));
        }
        if config.max_trigger_depth == 0 {
            return Err(PlanError::Config(
                "max_trigger_depth must be at least 1".into(),
            ));
        }
        if config.numeric_cache_capacity == 0 {
            return Err(PlanError::Config(
                "numeric_cache_capacity must be at least 1".into(),
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_setting_depth, 5);
        assert_eq!(config.max_trigger_depth, 32);
        assert_eq!(config.numeric_cache_capacity, 1024);
        assert_eq!(config.date_format, "%d %b %Y");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(r#"{"max_trigger_depth": 8}"#).unwrap();
        assert_eq!(config.max_trigger_depth, 8);
        assert_eq!(config.max_setting_depth, 5);
    }

    #[test]
    fn test_rejects_zero_depth() {
        let err = EngineConfig::from_json_str(r#"{"max_setting_depth": 0}"#).unwrap_err();
        assert!(matches!(err, PlanError::Config(_)));

        let err = EngineConfig::from_json_str(r#"{"max_trigger_depth": 0}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: max_trigger_depth must be at least 1"
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EngineConfig::from_json_str("not json").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
