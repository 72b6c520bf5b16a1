//! Descriptive statistics over quantity series
//!
//! All functions are total: an empty series yields `0.0` rather than `NaN`.

use statrs::statistics::Statistics;

/// Arithmetic mean, `0.0` for an empty series
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`), `0.0` for an empty series
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().population_std_dev()
}

/// Root mean squared deviation of every value about an arbitrary `center`.
///
/// Equals the population standard deviation when `center` is the series mean.
pub fn deviation_about(values: &[f64], center: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let variance = values
        .iter()
        .map(|&v| (v - center).powi(2))
        .sum::<f64>()
        / values.len() as f64;

    variance.sqrt()
}

/// Smallest and largest value, `None` for an empty series
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_population_std_dev() {
        // Classic example: population std dev of this set is exactly 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_std_dev(&values), 2.0, epsilon = 1e-12);

        assert_eq!(population_std_dev(&[]), 0.0);
        assert_eq!(population_std_dev(&[42.0]), 0.0);
    }

    #[test]
    fn test_deviation_about_mean_matches_std_dev() {
        let values = [10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0];
        let m = mean(&values);
        assert_relative_eq!(
            deviation_about(&values, m),
            population_std_dev(&values),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_deviation_about_other_center() {
        // Deviations of 1 and 3 about 0: sqrt((1 + 9) / 2)
        assert_relative_eq!(deviation_about(&[1.0, 3.0], 0.0), 5.0_f64.sqrt());
    }

    #[test]
    fn test_min_max() {
        assert_eq!(min_max(&[3.0, -1.0, 8.0, 2.0]), Some((-1.0, 8.0)));
        assert_eq!(min_max(&[5.0]), Some((5.0, 5.0)));
        assert_eq!(min_max(&[]), None);
    }
}
