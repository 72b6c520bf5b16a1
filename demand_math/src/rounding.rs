//! Decimal rounding of forecast values

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to `decimals` places, ties away from zero.
///
/// The exact binary value of the double is rounded, not its shortest decimal
/// rendering, so `13.65` (stored as `13.65000000000000035...`) becomes `13.7`.
pub fn round_half_up(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    match Decimal::from_f64_retain(value) {
        // Parsing the decimal text gives the nearest double to the rounded value
        Some(exact) => exact
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
            .to_string()
            .parse()
            .unwrap_or(value),
        // Outside the decimal range
        None => {
            let factor = 10_f64.powi(decimals as i32);
            (value * factor).round() / factor
        }
    }
}
