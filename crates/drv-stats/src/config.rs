//! Configuration for drv-stats
//!
//! Centralized tolerances and presentation settings. The defaults accept
//! probabilities summing to 1 within 1e-7.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrvConfig {
    /// Input validation settings
    pub input: InputConfig,
    /// Summary computation settings
    pub summary: SummaryConfig,
    /// Host display settings
    pub display: DisplayConfig,
}

/// Input validation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Maximum allowed |1 - sum(p)|
    pub normalization_tolerance: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            normalization_tolerance: 1e-7,
        }
    }
}

/// Summary computation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Slack allowed when comparing a cumulative probability against a quantile level
    pub quantile_tolerance: f64,
    /// Report a variance that cancels to a tiny negative value as 0
    pub clamp_negative_variance: bool,
    /// Standardized skewness below this magnitude counts as symmetric
    pub skew_tolerance: f64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            quantile_tolerance: 1e-7,
            clamp_negative_variance: true,
            skew_tolerance: 1e-9,
        }
    }
}

/// Display configuration for hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places for printed statistics
    pub precision: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { precision: 4 }
    }
}

impl DrvConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_tolerance(
            "input.normalization_tolerance",
            self.input.normalization_tolerance,
        )?;
        validate_tolerance("summary.quantile_tolerance", self.summary.quantile_tolerance)?;

        if !self.summary.skew_tolerance.is_finite() || self.summary.skew_tolerance < 0.0 {
            return Err(ConfigError::OutOfRange(
                "summary.skew_tolerance must be a non-negative number".to_string(),
            ));
        }

        if self.display.precision > 15 {
            return Err(ConfigError::OutOfRange(
                "display.precision must be at most 15".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_tolerance(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 || value > 1e-2 {
        return Err(ConfigError::OutOfRange(format!(
            "{} must be in (0, 0.01], got {}",
            name, value
        )));
    }
    Ok(())
}

/// Configuration loading or validation error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Invalid TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Cannot write TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
