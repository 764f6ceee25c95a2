//! Demo configuration
//!
//! Scoring itself is not configurable; these settings only drive the synthetic
//! generator and the application state around the engine.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Longest accepted generator lookback, 100 years
pub const MAX_LOOKBACK_HOURS: i64 = 100 * 365 * 24;

/// Synthetic transaction generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Transactions per batch
    pub batch_size: usize,
    /// Probability of drawing from the high-risk amount range
    pub high_amount_probability: f64,
    /// Inclusive lower bound of high-risk amounts
    pub high_amount_min: u32,
    /// Exclusive upper bound of high-risk amounts
    pub high_amount_max: u32,
    pub normal_amount_min: u32,
    pub normal_amount_max: u32,
    /// Timestamps fall within this many hours before now
    pub lookback_hours: i64,
    /// Fixed RNG seed for reproducible batches
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Check values the generator cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_LOOKBACK_HOURS).contains(&self.lookback_hours) {
            return Err(ConfigError::Invalid(format!(
                "lookback_hours {} outside 0..={}",
                self.lookback_hours, MAX_LOOKBACK_HOURS
            )));
        }

        if !(0.0..=1.0).contains(&self.high_amount_probability) {
            return Err(ConfigError::Invalid(format!(
                "high_amount_probability {} outside 0.0..=1.0",
                self.high_amount_probability
            )));
        }

        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            high_amount_probability: 0.3,
            high_amount_min: 1_000,
            high_amount_max: 16_000,
            normal_amount_min: 10,
            normal_amount_max: 510,
            lookback_hours: 24,
            seed: None,
        }
    }
}

/// Top-level demo configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub generator: GeneratorConfig,
    /// Keep at most this many results in history
    pub history_limit: Option<usize>,
}

impl DemoConfig {
    /// Load configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.generator.validate()?;
        Ok(config)
    }
}
