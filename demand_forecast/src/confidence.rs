//! Heuristic confidence scores
//!
//! The two forecasting strategies score their output differently and callers
//! rely on each formula's exact numbers, so both are kept side by side and
//! never blended. Neither is a statistical prediction interval.

use demand_math::statistics::{deviation_about, mean, population_std_dev};
use serde::{Deserialize, Serialize};

/// Which formula produced a confidence score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceStrategy {
    /// `1 - cv` around the moving-average base
    CoefficientOfVariation,
    /// Weighted data stability plus trend strength
    StabilityTrend,
    /// Fixed configured score
    Fixed,
}

/// Confidence from the coefficient of variation about `base`.
///
/// Deviations of every historical value are taken about `base` (the windowed
/// mean), then divided by it. A non-positive base counts as a coefficient of
/// 1.0. An empty history scores 0.
pub fn coefficient_of_variation(values: &[f64], base: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let std_dev = deviation_about(values, base);
    let cv = if base > 0.0 { std_dev / base } else { 1.0 };

    (1.0 - cv).clamp(0.0, 1.0)
}

/// Weights of the stability-trend score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityTrendWeights {
    pub stability: f64,
    pub trend: f64,
    pub epsilon: f64,
}

impl Default for StabilityTrendWeights {
    fn default() -> Self {
        Self {
            stability: 0.7,
            trend: 0.3,
            epsilon: 1e-10,
        }
    }
}

/// Confidence from data stability and trend strength.
///
/// `stability = 1 / (1 + std / (mean + epsilon))`; the trend contribution is
/// capped at 1. An empty history scores 0.
pub fn stability_trend(values: &[f64], trend_factor: f64, weights: &StabilityTrendWeights) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let stability = 1.0 / (1.0 + population_std_dev(values) / (mean(values) + weights.epsilon));
    let trend_strength = trend_factor.abs().min(1.0);
    let score = weights.stability * stability + weights.trend * trend_strength;

    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}
