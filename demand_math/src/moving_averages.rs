//! Moving average calculations over quantity series

/// Mean of the most recent `period` observations.
///
/// When the series is shorter than `period` the whole series is averaged.
/// An empty series (or a zero period) averages to `0.0`.
pub fn trailing_mean(values: &[f64], period: usize) -> f64 {
    let period = period.min(values.len());
    if period == 0 {
        return 0.0;
    }

    let tail = &values[values.len() - period..];
    tail.iter().sum::<f64>() / period as f64
}
