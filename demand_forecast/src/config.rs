//! Tunable constants of the forecasting engine
//!
//! Every numeric constant the models use lives here so each strategy can be
//! constructed and tested with its own parameters. The defaults reproduce the
//! production behaviour.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Moving-average trend extrapolation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Number of most recent observations averaged into the base
    pub window_size: usize,
    /// Linear growth applied per forecast day
    pub trend_rate: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_size: 7,
            trend_rate: 0.05,
        }
    }
}

/// Normalized sequence extrapolation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Length of each sliding window
    pub sequence_length: usize,
    /// Share of the trend factor applied per forecast day
    pub trend_step: f64,
    /// Weight of data stability in the confidence score
    pub stability_weight: f64,
    /// Weight of trend strength in the confidence score
    pub trend_weight: f64,
    /// Added to the mean before dividing by it
    pub epsilon: f64,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            sequence_length: 10,
            trend_step: 0.1,
            stability_weight: 0.7,
            trend_weight: 0.3,
            epsilon: 1e-10,
        }
    }
}

/// Product lifecycle adjustment of aggregate demand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Daily growth from new product launches
    pub launch_rate: f64,
    /// Forecast day after which launches start to count
    pub launch_after_day: usize,
    /// Daily decline from delisted products
    pub delist_rate: f64,
    /// Forecast day after which delisting starts to count
    pub delist_after_day: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            launch_rate: 0.02,
            launch_after_day: 10,
            delist_rate: 0.02,
            delist_after_day: 15,
        }
    }
}

impl LifecycleConfig {
    /// New-product ramp-up multiplier for forecast day `day` (1-based)
    pub fn launch_factor(&self, day: usize) -> f64 {
        1.0 + self.launch_rate * day.saturating_sub(self.launch_after_day) as f64
    }

    /// Old-product decline multiplier for forecast day `day` (1-based)
    pub fn delist_factor(&self, day: usize) -> f64 {
        1.0 - self.delist_rate * day.saturating_sub(self.delist_after_day) as f64
    }
}

/// How much history is requested from the data provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Days of sales history before today
    pub lookback_days: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { lookback_days: 15 }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub trend: TrendConfig,
    pub sequence: SequenceConfig,
    pub lifecycle: LifecycleConfig,
    pub history: HistoryConfig,
    /// Confidence reported for aggregate pharmacy demand
    pub aggregate_confidence: f64,
    /// Horizon used when a request does not name one
    pub default_horizon_days: usize,
    /// Decimal places kept in predicted values
    pub decimals: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            trend: TrendConfig::default(),
            sequence: SequenceConfig::default(),
            lifecycle: LifecycleConfig::default(),
            history: HistoryConfig::default(),
            aggregate_confidence: 0.85,
            default_horizon_days: 30,
            decimals: 1,
        }
    }
}

impl ForecastConfig {
    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON configuration file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every parameter is usable by the models
    pub fn validate(&self) -> Result<()> {
        if self.trend.window_size == 0 {
            return Err(invalid("trend.window_size must be positive"));
        }
        if !self.trend.trend_rate.is_finite() {
            return Err(invalid("trend.trend_rate must be finite"));
        }
        if self.sequence.sequence_length == 0 {
            return Err(invalid("sequence.sequence_length must be positive"));
        }
        if !self.sequence.trend_step.is_finite() {
            return Err(invalid("sequence.trend_step must be finite"));
        }
        for (name, weight) in [
            ("sequence.stability_weight", self.sequence.stability_weight),
            ("sequence.trend_weight", self.sequence.trend_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(invalid(&format!("{} must be between 0 and 1", name)));
            }
        }
        if !(self.sequence.epsilon > 0.0 && self.sequence.epsilon.is_finite()) {
            return Err(invalid("sequence.epsilon must be a small positive number"));
        }
        if !self.lifecycle.launch_rate.is_finite() || !self.lifecycle.delist_rate.is_finite() {
            return Err(invalid("lifecycle rates must be finite"));
        }
        if !(0.0..=1.0).contains(&self.aggregate_confidence) {
            return Err(invalid("aggregate_confidence must be between 0 and 1"));
        }
        if self.decimals > 10 {
            return Err(invalid("decimals must be at most 10"));
        }
        Ok(())
    }

    /// Requested horizon, or the configured default
    pub fn horizon_or_default(&self, horizon: Option<usize>) -> usize {
        horizon.unwrap_or(self.default_horizon_days)
    }
}

fn invalid(message: &str) -> ForecastError {
    ForecastError::InvalidParameter(message.to_string())
}
