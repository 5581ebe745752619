//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::SelectionConfig;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SERO_*`)
/// 2. Project config (`seropool.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SeroConfig {
    pub selection: SelectionConfig,
}

impl SeroConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("seropool.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &SeroConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.selection.dynamic_adjusted_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "selection.dynamic_adjusted_threshold".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut SeroConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: SeroConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut SeroConfig, other: &SeroConfig) {
        if other.selection.dynamic_adjusted_threshold.is_some() {
            base.selection.dynamic_adjusted_threshold =
                other.selection.dynamic_adjusted_threshold;
        }
        if other.selection.parallel.is_some() {
            base.selection.parallel = other.selection.parallel;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SERO_DYNAMIC_ADJUSTED_THRESHOLD`, `SERO_PARALLEL`.
    fn apply_env_overrides(config: &mut SeroConfig) {
        if let Ok(val) = std::env::var("SERO_DYNAMIC_ADJUSTED_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.selection.dynamic_adjusted_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SERO_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.selection.parallel = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
