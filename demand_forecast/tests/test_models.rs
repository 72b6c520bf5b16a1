use approx::assert_relative_eq;
use chrono::NaiveDate;
use demand_forecast::confidence::ConfidenceStrategy;
use demand_forecast::data::TimeSeries;
use demand_forecast::models::sequence_extrapolation::SequenceExtrapolation;
use demand_forecast::models::trend_extrapolation::TrendExtrapolation;
use demand_forecast::models::{Degeneracy, FittedModel, ForecastModel};
use demand_math::rounding::round_half_up;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

fn create_test_series() -> TimeSeries {
    TimeSeries::new(vec![10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0]).unwrap()
}

fn random_series(rng: &mut StdRng) -> TimeSeries {
    let len = rng.gen_range(0..40);
    let values = (0..len).map(|_| rng.gen_range(0.0..500.0)).collect();
    TimeSeries::new(values).unwrap()
}

#[test]
fn test_trend_extrapolation_reference_series() {
    let series = create_test_series();
    let model = TrendExtrapolation::new(7, 0.05).unwrap();

    let fitted = model.fit(&series);
    assert_eq!(fitted.base(), 13.0);

    let prediction = fitted.forecast(5);
    let expected: Vec<f64> = (1..=5)
        .map(|day| round_half_up(13.0 * (1.0 + 0.05 * day as f64), 1))
        .collect();

    assert_eq!(prediction.values, expected);
    // 13.0 * 1.05 = 13.65, rounded half up
    assert_eq!(prediction.values[0], 13.7);
    assert_eq!(prediction.degeneracy, None);

    // Deviations about 13 have a population std dev of 2
    assert_relative_eq!(prediction.confidence, 1.0 - 2.0 / 13.0, epsilon = 1e-12);
}

#[test]
fn test_trend_extrapolation_short_window() {
    let series = create_test_series();
    let model = TrendExtrapolation::new(3, 0.05).unwrap();

    // Mean of the last three observations
    assert_eq!(model.fit(&series).base(), 15.0);
}

#[test]
fn test_trend_extrapolation_is_non_decreasing() {
    let model = TrendExtrapolation::new(7, 0.05).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..50 {
        let series = random_series(&mut rng);
        let values = model.predict(&series, 20).values;

        assert_eq!(values.len(), 20);
        assert!(values.windows(2).all(|w| w[1] >= w[0]), "{:?}", values);
    }
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(30)]
fn test_empty_series_degrades_to_zero(#[case] horizon: usize) {
    let empty = TimeSeries::empty();

    let trend = TrendExtrapolation::new(7, 0.05).unwrap().predict(&empty, horizon);
    assert_eq!(trend.values, vec![0.0; horizon]);
    assert_eq!(trend.confidence, 0.0);
    assert_eq!(trend.degeneracy, Some(Degeneracy::EmptySeries));

    let sequence = SequenceExtrapolation::new(10).unwrap().predict(&empty, horizon);
    assert_eq!(sequence.values, vec![0.0; horizon]);
    assert_eq!(sequence.confidence, 0.0);
    assert_eq!(sequence.degeneracy, Some(Degeneracy::EmptySeries));
}

#[test]
fn test_sequence_flat_series_is_flat() {
    let series = TimeSeries::new(vec![5.0; 12]).unwrap();
    let model = SequenceExtrapolation::new(10).unwrap();

    let fitted = model.fit(&series);
    assert_eq!(fitted.trend(), 0.0);

    let prediction = fitted.forecast(6);
    assert_eq!(prediction.values, vec![5.0; 6]);
    // No spread and no trend: only the stability term
    assert_relative_eq!(prediction.confidence, 0.7, epsilon = 1e-12);
}

#[test]
fn test_sequence_rising_series() {
    let series = TimeSeries::new((1..=12).map(f64::from).collect()).unwrap();
    let model = SequenceExtrapolation::new(10).unwrap();

    let fitted = model.fit(&series);
    // Slope 1 over a mean of 6.5
    assert_relative_eq!(fitted.trend(), 1.0 / 6.5, epsilon = 1e-12);

    // Last window mean is 6.5 / 11 normalized; each day adds trend * 0.1
    let prediction = fitted.forecast(3);
    assert_eq!(prediction.values, vec![7.6, 7.7, 7.8]);
    assert_eq!(prediction.degeneracy, None);

    let values: Vec<f64> = (1..=12).map(f64::from).collect();
    let mean = 6.5;
    let std_dev = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / 12.0).sqrt();
    let expected = 0.7 / (1.0 + std_dev / (mean + 1e-10)) + 0.3 / 6.5;
    assert_relative_eq!(prediction.confidence, expected, epsilon = 1e-9);
}

#[test]
fn test_sequence_falling_series() {
    let series = TimeSeries::new((1..=12).rev().map(f64::from).collect()).unwrap();
    let model = SequenceExtrapolation::new(10).unwrap();

    let fitted = model.fit(&series);
    assert!(fitted.trend() < 0.0);

    let values = fitted.forecast(10).values;
    assert!(values.windows(2).all(|w| w[1] <= w[0]), "{:?}", values);
    assert!(values[9] < values[0]);
}

#[test]
fn test_sequence_exactly_one_window() {
    let series = TimeSeries::new((1..=10).map(f64::from).collect()).unwrap();
    let fitted = SequenceExtrapolation::new(10).unwrap().fit(&series);

    assert!(fitted.base().is_some());
    assert_eq!(fitted.degeneracy(), None);
}

#[test]
fn test_sequence_undersized_series_is_flagged() {
    let series = TimeSeries::new(vec![8.0, 2.0, 6.0]).unwrap();
    let prediction = SequenceExtrapolation::new(10).unwrap().predict(&series, 4);

    // Zero base denormalizes to the series minimum
    assert_eq!(prediction.values, vec![2.0; 4]);
    assert!(prediction.confidence > 0.0);
    assert_eq!(
        prediction.degeneracy,
        Some(Degeneracy::InsufficientHistory {
            required: 10,
            available: 3
        })
    );
}

#[test]
fn test_confidence_always_in_unit_interval() {
    let trend = TrendExtrapolation::new(7, 0.05).unwrap();
    let sequence = SequenceExtrapolation::new(10).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let series = random_series(&mut rng);
        for confidence in [
            trend.fit(&series).confidence(),
            sequence.fit(&series).confidence(),
        ] {
            assert!((0.0..=1.0).contains(&confidence), "{}", confidence);
        }
    }
}

#[test]
fn test_forecast_attaches_dates() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let model = TrendExtrapolation::new(7, 0.05).unwrap();
    let result = model.forecast(&create_test_series(), 5, today);

    assert_eq!(result.predicted_values.len(), 5);
    assert_eq!(result.dates.len(), 5);
    assert_eq!(result.dates[0], "2024-01-11");
    assert_eq!(result.dates[4], "2024-01-15");
    assert_eq!(result.model_version, "trend-extrapolation/1");
    assert!(result.per_entity_predictions.is_none());
}

#[test]
fn test_confidence_strategies_are_distinct() {
    let trend = TrendExtrapolation::new(7, 0.05).unwrap();
    let sequence = SequenceExtrapolation::new(10).unwrap();

    assert_eq!(
        trend.confidence_strategy(),
        ConfidenceStrategy::CoefficientOfVariation
    );
    assert_eq!(
        sequence.confidence_strategy(),
        ConfidenceStrategy::StabilityTrend
    );
}

#[test]
fn test_model_parameter_validation() {
    assert!(TrendExtrapolation::new(0, 0.05).is_err());
    assert!(SequenceExtrapolation::new(0).is_err());
}
