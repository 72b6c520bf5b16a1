//! Normalized sliding-window extrapolation
//!
//! The series is min-max normalized and cut into sliding windows. The mean
//! of the last window is the base for every forecast day; it is never fed
//! back, so there is no autoregression. A relative least-squares trend
//! scales the base up or down per day, and the result is mapped back onto
//! the original range.
//!
//! This is a window-average heuristic. It has no learned parameters.

use crate::confidence::{stability_trend, ConfidenceStrategy, StabilityTrendWeights};
use crate::config::SequenceConfig;
use crate::data::TimeSeries;
use crate::error::{ForecastError, Result};
use crate::models::{Degeneracy, FittedModel, ForecastModel, Prediction};
use demand_math::regression::least_squares_slope;
use demand_math::rounding::round_half_up;
use demand_math::scaling::MinMaxScaler;
use demand_math::statistics::mean;

/// A fixed-length slice of the normalized series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowedSequence<'a>(&'a [f64]);

impl<'a> WindowedSequence<'a> {
    pub fn values(&self) -> &'a [f64] {
        self.0
    }

    pub fn mean(&self) -> f64 {
        mean(self.0)
    }
}

/// Every window of `length` consecutive values, oldest first.
///
/// A series of `n` values yields `n - length + 1` windows, none when it is
/// shorter than `length`.
pub fn sliding_windows(values: &[f64], length: usize) -> impl Iterator<Item = WindowedSequence<'_>> {
    // `slice::windows` panics on zero
    let length = length.max(1);
    values.windows(length).map(WindowedSequence)
}

/// Least-squares slope over the raw series relative to its mean magnitude.
///
/// Positive for rising series, negative for falling ones, `0.0` when the mean
/// is zero or there are fewer than two points.
pub fn trend_factor(values: &[f64]) -> f64 {
    let average = mean(values);
    if average == 0.0 {
        return 0.0;
    }
    least_squares_slope(values) / average.abs()
}

/// Sequence extrapolation model
#[derive(Debug, Clone)]
pub struct SequenceExtrapolation {
    /// Name of the model
    name: String,
    sequence_length: usize,
    /// Share of the trend applied per day
    trend_step: f64,
    weights: StabilityTrendWeights,
    decimals: u32,
}

/// Sequence extrapolation fitted to one series
#[derive(Debug, Clone, PartialEq)]
pub struct FittedSequence {
    /// `None` for an empty series
    scaler: Option<MinMaxScaler>,
    /// Mean of the last normalized window, `None` without a full window
    base: Option<f64>,
    trend: f64,
    trend_step: f64,
    decimals: u32,
    confidence: f64,
    degeneracy: Option<Degeneracy>,
}

impl SequenceExtrapolation {
    /// Create a new model with the default trend step and confidence weights
    pub fn new(sequence_length: usize) -> Result<Self> {
        Self::from_config(&SequenceConfig {
            sequence_length,
            ..SequenceConfig::default()
        })
    }

    /// Create the model from configuration
    pub fn from_config(config: &SequenceConfig) -> Result<Self> {
        if config.sequence_length == 0 {
            return Err(ForecastError::InvalidParameter(
                "Sequence length must be positive".to_string(),
            ));
        }
        if !config.trend_step.is_finite() {
            return Err(ForecastError::InvalidParameter(
                "Trend step must be finite".to_string(),
            ));
        }
        if config.epsilon.is_nan() || config.epsilon <= 0.0 {
            return Err(ForecastError::InvalidParameter(
                "Epsilon must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!(
                "Sequence Extrapolation (length={})",
                config.sequence_length
            ),
            sequence_length: config.sequence_length,
            trend_step: config.trend_step,
            weights: StabilityTrendWeights {
                stability: config.stability_weight,
                trend: config.trend_weight,
                epsilon: config.epsilon,
            },
            decimals: 1,
        })
    }

    /// Keep a different number of decimal places
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }
}

impl ForecastModel for SequenceExtrapolation {
    type Fitted = FittedSequence;

    fn fit(&self, series: &TimeSeries) -> FittedSequence {
        let raw = series.values();

        let scaler = MinMaxScaler::fit(raw).ok();
        let base = scaler.and_then(|scaler| {
            let normalized = scaler.transform_all(raw);
            sliding_windows(&normalized, self.sequence_length)
                .last()
                .map(|window| window.mean())
        });

        let trend = trend_factor(raw);
        let confidence = stability_trend(raw, trend, &self.weights);

        let degeneracy = if raw.is_empty() {
            Some(Degeneracy::EmptySeries)
        } else if base.is_none() {
            Some(Degeneracy::InsufficientHistory {
                required: self.sequence_length,
                available: raw.len(),
            })
        } else {
            None
        };

        match degeneracy {
            Some(reason) => tracing::debug!(?reason, "sequence extrapolation falls back to zero base"),
            None => tracing::debug!(
                observations = raw.len(),
                base,
                trend,
                confidence,
                "fitted sequence extrapolation"
            ),
        }

        FittedSequence {
            scaler,
            base,
            trend,
            trend_step: self.trend_step,
            decimals: self.decimals,
            confidence,
            degeneracy,
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn model_version(&self) -> &'static str {
        "sequence-extrapolation/1"
    }

    fn confidence_strategy(&self) -> ConfidenceStrategy {
        ConfidenceStrategy::StabilityTrend
    }
}

impl FittedSequence {
    /// Relative trend of the raw series
    pub fn trend(&self) -> f64 {
        self.trend
    }

    /// Normalized base, `None` when no full window existed
    pub fn base(&self) -> Option<f64> {
        self.base
    }

    /// Normalized prediction for zero-based forecast day `index`
    fn normalized_prediction(&self, index: usize) -> f64 {
        let Some(base) = self.base else {
            return 0.0;
        };

        let adjustment = self.trend.abs() * (index + 1) as f64 * self.trend_step;
        if self.trend > 0.0 {
            base * (1.0 + adjustment)
        } else if self.trend < 0.0 {
            base * (1.0 - adjustment)
        } else {
            base
        }
    }
}

impl FittedModel for FittedSequence {
    fn forecast(&self, horizon: usize) -> Prediction {
        let values = (0..horizon)
            .map(|index| {
                let normalized = self.normalized_prediction(index);
                let denormalized = match self.scaler {
                    Some(scaler) => scaler.inverse_transform(normalized),
                    None => normalized,
                };
                round_half_up(denormalized, self.decimals)
            })
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
