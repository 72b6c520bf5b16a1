//! Moving-average base with a linear daily trend
//!
//! The base is the mean of the most recent observations and every forecast
//! day grows it by a fixed rate: `base * (1 + rate * day)`. With a positive
//! rate the output rises monotonically whatever the shape of the history.

use crate::confidence::{coefficient_of_variation, ConfidenceStrategy};
use crate::config::TrendConfig;
use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::{Degeneracy, FittedModel, ForecastModel, Prediction};
use demand_math::moving_averages::trailing_mean;
use demand_math::rounding::round_half_up;

/// Trend extrapolation model
#[derive(Debug, Clone)]
pub struct TrendExtrapolation {
    /// Name of the model
    name: String,
    /// Observations averaged into the base
    window_size: usize,
    /// Growth per forecast day
    trend_rate: f64,
    /// Decimal places kept
    decimals: u32,
}

/// Trend extrapolation fitted to one series
#[derive(Debug, Clone, PartialEq)]
pub struct FittedTrend {
    base: f64,
    trend_rate: f64,
    decimals: u32,
    confidence: f64,
    degeneracy: Option<Degeneracy>,
}

impl TrendExtrapolation {
    /// Create a new trend extrapolation model
    pub fn new(window_size: usize, trend_rate: f64) -> Result<Self> {
        if window_size == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }
        if !trend_rate.is_finite() {
            return Err(ForecastError::InvalidParameter(
                "Trend rate must be finite".to_string(),
            ));
        }

        Ok(Self {
            name: format!(
                "Trend Extrapolation (window={}, rate={})",
                window_size, trend_rate
            ),
            window_size,
            trend_rate,
            decimals: 1,
        })
    }

    /// Create the model from configuration
    pub fn from_config(config: &TrendConfig) -> Result<Self> {
        Self::new(config.window_size, config.trend_rate)
    }

    /// Keep a different number of decimal places
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn trend_rate(&self) -> f64 {
        self.trend_rate
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Trend multiplier for forecast day `day` (1-based)
    pub fn growth(&self, day: usize) -> f64 {
        linear_growth(self.trend_rate, day)
    }
}

fn linear_growth(rate: f64, day: usize) -> f64 {
    1.0 + rate * day as f64
}

impl ForecastModel for TrendExtrapolation {
    type Fitted = FittedTrend;

    fn fit(&self, series: &TimeSeries) -> FittedTrend {
        let values = series.values();
        let base = trailing_mean(values, self.window_size);
        let confidence = coefficient_of_variation(values, base);
        let degeneracy = values.is_empty().then_some(Degeneracy::EmptySeries);

        tracing::debug!(
            observations = values.len(),
            base,
            confidence,
            "fitted trend extrapolation"
        );

        FittedTrend {
            base,
            trend_rate: self.trend_rate,
            decimals: self.decimals,
            confidence,
            degeneracy,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model_version(&self) -> &'static str {
        "trend-extrapolation/1"
    }

    fn confidence_strategy(&self) -> ConfidenceStrategy {
        ConfidenceStrategy::CoefficientOfVariation
    }
}

impl FittedTrend {
    /// Moving-average base the forecast grows from
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Trend multiplier for forecast day `day` (1-based)
    pub fn growth(&self, day: usize) -> f64 {
        linear_growth(self.trend_rate, day)
    }
}

impl FittedModel for FittedTrend {
    fn forecast(&self, horizon: usize) -> Prediction {
        let values = (1..=horizon)
            .map(|day| round_half_up(self.base * self.growth(day), self.decimals))
            .collect();

        Prediction {
            values,
            confidence: self.confidence,
            degeneracy: self.degeneracy,
        }
    }

    fn confidence(&self) -> f64 {
        self.confidence
    }

    fn degeneracy(&self) -> Option<Degeneracy> {
        self.degeneracy
    }
}
