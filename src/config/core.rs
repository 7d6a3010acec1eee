//! Core configuration structure and builder for tree training and route
//! extraction.

use crate::core::constants::*;
use crate::core::error::{CartError, Result};
use crate::tree::score::ScoreFunction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Configuration for building trees and enumerating routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Split quality measure
    pub score: ScoreFunction,
    /// Gain a split must strictly exceed
    pub min_gain: f64,
    /// Row count each side of a split must strictly exceed
    pub min_samples: usize,
    /// Columns pinned by anchor values during route enumeration
    pub anchor_columns: Vec<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            score: ScoreFunction::Variance,
            min_gain: DEFAULT_MIN_GAIN,
            min_samples: DEFAULT_MIN_SAMPLES,
            anchor_columns: DEFAULT_ANCHOR_COLUMNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TreeConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.min_gain.is_finite() || self.min_gain < 0.0 {
            return Err(CartError::invalid_parameter(
                "min_gain",
                self.min_gain.to_string(),
                "must be finite and non-negative",
            ));
        }

        for (i, name) in self.anchor_columns.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(CartError::invalid_parameter(
                    format!("anchor_columns[{}]", i),
                    name.clone(),
                    "must not be blank",
                ));
            }
            if self.anchor_columns[..i].contains(name) {
                return Err(CartError::invalid_parameter(
                    format!("anchor_columns[{}]", i),
                    name.clone(),
                    "duplicates an earlier anchor column",
                ));
            }
        }

        Ok(())
    }

    /// Load configuration from a `.json` or `.toml` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CartError::config(format!("Failed to read config file: {}", e)))?;

        let config: TreeConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| CartError::config(format!("Failed to parse JSON config: {}", e)))?,
            Some("toml") => toml::from_str(&content)
                .map_err(|e| CartError::config(format!("Failed to parse TOML config: {}", e)))?,
            _ => {
                return Err(CartError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        log::info!("loaded tree configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a `.json` or `.toml` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| CartError::config(format!("Failed to serialize to JSON: {}", e)))?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| CartError::config(format!("Failed to serialize to TOML: {}", e)))?,
            _ => {
                return Err(CartError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| CartError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Load `cart-route.toml` from `dir` when it exists, otherwise the
    /// defaults. Environment overrides apply on top either way.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(super::DEFAULT_CONFIG_FILE);
        let mut config = if path.is_file() {
            Self::load_from_file(&path)?
        } else {
            log::debug!("no {} found, using defaults", path.display());
            Self::default()
        };
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Load configuration from `CART_SCORE`, `CART_MIN_GAIN` and
    /// `CART_MIN_SAMPLES`, falling back to defaults for unset variables
    pub fn load_from_environment() -> Result<Self> {
        let mut config = TreeConfig::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply environment variable overrides to an existing configuration
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_SCORE) {
            self.score = val
                .parse()
                .map_err(|_| CartError::config(format!("Invalid {}", ENV_SCORE)))?;
        }

        if let Some(val) = lookup(ENV_MIN_GAIN) {
            self.min_gain = val
                .trim()
                .parse()
                .map_err(|_| CartError::config(format!("Invalid {}", ENV_MIN_GAIN)))?;
        }

        if let Some(val) = lookup(ENV_MIN_SAMPLES) {
            self.min_samples = val
                .trim()
                .parse()
                .map_err(|_| CartError::config(format!("Invalid {}", ENV_MIN_SAMPLES)))?;
        }

        self.validate()
    }

    /// Get configuration as a parameter map (for debugging/serialization)
    pub fn as_parameter_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("score".to_string(), self.score.to_string());
        map.insert("min_gain".to_string(), self.min_gain.to_string());
        map.insert("min_samples".to_string(), self.min_samples.to_string());
        map.insert("anchor_columns".to_string(), self.anchor_columns.join(","));
        map
    }
}

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct TreeConfigBuilder {
    config: TreeConfig,
    validation_errors: Vec<String>,
}

impl TreeConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        TreeConfigBuilder {
            config: TreeConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the split score
    pub fn score(mut self, score: ScoreFunction) -> Self {
        self.config.score = score;
        self
    }

    /// Set the minimum gain
    pub fn min_gain(mut self, min_gain: f64) -> Self {
        if !min_gain.is_finite() || min_gain < 0.0 {
            self.validation_errors
                .push("min_gain must be finite and non-negative".to_string());
        }
        self.config.min_gain = min_gain;
        self
    }

    /// Set the minimum samples per split side
    pub fn min_samples(mut self, min_samples: usize) -> Self {
        self.config.min_samples = min_samples;
        self
    }

    /// Replace the anchor columns
    pub fn anchor_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.anchor_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TreeConfig> {
        if !self.validation_errors.is_empty() {
            return Err(CartError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for TreeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
