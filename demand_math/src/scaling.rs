//! Min-max scaling of quantity series into the unit interval

use crate::statistics::min_max;
use crate::{MathError, Result};
use serde::{Deserialize, Serialize};

/// Scaler mapping `[min, max]` onto `[0, 1]` and back.
///
/// A flat series (`max == min`) scales every value to `0.0`; the inverse of
/// `0.0` is then `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    min: f64,
    max: f64,
}

impl MinMaxScaler {
    /// Fit the scaler to the bounds of a series
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MathError::InvalidInput(
                "Cannot scale a series containing non-finite values".to_string(),
            ));
        }

        let (min, max) = min_max(values).ok_or_else(|| {
            MathError::InsufficientData("Cannot fit a scaler to an empty series".to_string())
        })?;

        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the fitted range
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_flat(&self) -> bool {
        self.range() == 0.0
    }

    /// Scale a single value into the unit interval
    pub fn transform(&self, value: f64) -> f64 {
        if self.is_flat() {
            0.0
        } else {
            (value - self.min) / self.range()
        }
    }

    /// Map a scaled value back onto the original range
    pub fn inverse_transform(&self, scaled: f64) -> f64 {
        scaled * self.range() + self.min
    }

    /// Scale a whole series
    pub fn transform_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.transform(v)).collect()
    }
}
