//! Least-squares trend estimation
//!
//! Observations are regressed against their position in the series
//! (`x = 0, 1, 2, ...`), which is how the forecasting models read a
//! chronologically ordered quantity series.

use crate::{MathError, Result};

/// Ordinary least-squares trend of value against index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRegression {
    slope: f64,
}

impl LinearRegression {
    /// Fit the regression line over the whole series
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.len() < 2 {
            return Err(MathError::InsufficientData(format!(
                "Linear regression needs at least 2 points, got {}",
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Linear regression input must be finite".to_string(),
            ));
        }

        let n = values.len() as f64;

        // Calculate means
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = values.iter().sum::<f64>() / n;

        let mut numerator = 0.0;
        let mut denominator = 0.0;

        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            numerator += (x - x_mean) * (y - y_mean);
            denominator += (x - x_mean) * (x - x_mean);
        }

        // Cannot happen for n >= 2, the x values are distinct
        if denominator.abs() < 1e-10 {
            return Err(MathError::InsufficientData(
                "Cannot calculate slope: x values are too similar".to_string(),
            ));
        }

        let slope = numerator / denominator;

        Ok(Self { slope })
    }

    /// Change in value per step
    pub fn slope(&self) -> f64 {
        self.slope
    }
}

/// Least-squares slope of the series, `0.0` when fewer than two points exist
pub fn least_squares_slope(values: &[f64]) -> f64 {
    LinearRegression::fit(values)
        .map(|regression| regression.slope())
        .unwrap_or(0.0)
}
