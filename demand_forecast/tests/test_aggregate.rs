use chrono::NaiveDate;
use demand_forecast::confidence::ConfidenceStrategy;
use demand_forecast::config::ForecastConfig;
use demand_forecast::data::{group_by_entity, EntityDescriptor, EntitySeries, HistoricalRecord, TimeSeries};
use demand_forecast::models::aggregate::AggregateDemand;
use demand_forecast::models::Degeneracy;
use demand_math::rounding::round_half_up;
use pretty_assertions::assert_eq;

fn entity(id: i64, name: &str, values: Vec<f64>) -> EntitySeries {
    EntitySeries {
        entity: EntityDescriptor::new(id, name),
        series: TimeSeries::new(values).unwrap(),
    }
}

fn model() -> AggregateDemand {
    AggregateDemand::from_config(&ForecastConfig::default()).unwrap()
}

#[test]
fn test_aggregate_sums_entity_bases() {
    let entities = vec![
        entity(1, "Aspirin", vec![5.0, 5.0, 5.0]),
        entity(2, "Ibuprofen", vec![3.0, 3.0, 3.0]),
    ];

    let prediction = model().predict(&entities, 3);

    let expected_total: Vec<f64> = (1..=3)
        .map(|day| round_half_up(8.0 * (1.0 + 0.05 * day as f64), 1))
        .collect();
    assert_eq!(prediction.total.values, expected_total);
    assert_eq!(prediction.total.confidence, 0.85);
    assert_eq!(prediction.total.degeneracy, None);

    let expected_aspirin: Vec<f64> = (1..=3)
        .map(|day| round_half_up(5.0 * (1.0 + 0.05 * day as f64), 1))
        .collect();
    let expected_ibuprofen: Vec<f64> = (1..=3)
        .map(|day| round_half_up(3.0 * (1.0 + 0.05 * day as f64), 1))
        .collect();
    assert_eq!(prediction.per_entity["Aspirin"], expected_aspirin);
    assert_eq!(prediction.per_entity["Ibuprofen"], expected_ibuprofen);
}

#[test]
fn test_lifecycle_factors_apply_to_total_only() {
    let entities = vec![entity(1, "Aspirin", vec![10.0; 7])];
    let prediction = model().predict(&entities, 20);

    for day in 1..=20usize {
        let growth = 1.0 + 0.05 * day as f64;
        let launch = 1.0 + 0.02 * day.saturating_sub(10) as f64;
        let delist = 1.0 - 0.02 * day.saturating_sub(15) as f64;

        assert_eq!(
            prediction.total.values[day - 1],
            round_half_up(10.0 * growth * launch * delist, 1),
            "aggregate day {}",
            day
        );
        assert_eq!(
            prediction.per_entity["Aspirin"][day - 1],
            round_half_up(10.0 * growth, 1),
            "breakdown day {}",
            day
        );
    }

    // Past day 10 the total and the breakdown diverge
    assert!(prediction.total.values[19] != prediction.per_entity["Aspirin"][19]);
}

#[test]
fn test_catalog_entity_without_sales_is_kept() {
    let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
    let records = vec![
        HistoricalRecord::for_entity(day(1), 4.0, 1, "Aspirin"),
        HistoricalRecord::for_entity(day(2), 6.0, 1, "Aspirin"),
        // Not in the catalog
        HistoricalRecord::for_entity(day(2), 50.0, 99, "Retired"),
    ];
    let catalog = vec![
        EntityDescriptor::new(1, "Aspirin"),
        EntityDescriptor::new(2, "Vitamin C"),
    ];

    let entities = group_by_entity(&records, &catalog).unwrap();
    assert_eq!(entities.len(), 2);
    assert!(entities[1].series.is_empty());

    let prediction = model().predict(&entities, 3);
    assert_eq!(prediction.per_entity["Vitamin C"], vec![0.0; 3]);
    // Total is driven by Aspirin alone (base 5)
    assert_eq!(
        prediction.total.values[0],
        round_half_up(5.0 * 1.05, 1)
    );
}

#[test]
fn test_no_history_anywhere() {
    let entities = vec![entity(1, "Aspirin", vec![]), entity(2, "Ibuprofen", vec![])];
    let prediction = model().predict(&entities, 4);

    assert_eq!(prediction.total.values, vec![0.0; 4]);
    assert_eq!(prediction.total.confidence, 0.0);
    assert_eq!(prediction.total.degeneracy, Some(Degeneracy::EmptySeries));
    assert_eq!(prediction.per_entity.len(), 2);

    // No catalog at all behaves the same way
    let prediction = model().predict(&[], 2);
    assert_eq!(prediction.total.values, vec![0.0; 2]);
    assert!(prediction.per_entity.is_empty());
}

#[test]
fn test_aggregate_result_carries_breakdown() {
    let entities = vec![entity(1, "Aspirin", vec![2.0, 4.0])];
    let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
    let result = model().forecast(&entities, 3, today);

    assert_eq!(result.dates, vec!["2024-12-31", "2025-01-01", "2025-01-02"]);
    assert_eq!(result.model_version, "aggregate-trend/1");
    let breakdown = result.per_entity_predictions.unwrap();
    assert_eq!(breakdown["Aspirin"].len(), 3);
}

#[test]
fn test_repeated_catalog_id_counted_once() {
    let records = vec![HistoricalRecord::for_entity(
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        10.0,
        1,
        "Aspirin",
    )];
    let catalog = vec![
        EntityDescriptor::new(1, "Aspirin"),
        EntityDescriptor::new(1, "Aspirin"),
    ];

    let entities = group_by_entity(&records, &catalog).unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].series.values(), &[10.0]);

    let prediction = model().predict(&entities, 2);
    let expected: Vec<f64> = (1..=2)
        .map(|day| round_half_up(10.0 * (1.0 + 0.05 * day as f64), 1))
        .collect();
    assert_eq!(prediction.total.values, expected);
    // Breakdown agrees with the total
    assert_eq!(prediction.per_entity["Aspirin"], expected);
}

#[test]
fn test_aggregate_confidence_is_fixed() {
    let model = model();
    assert_eq!(model.confidence_strategy(), ConfidenceStrategy::Fixed);

    let entities = vec![entity(1, "Aspirin", vec![1.0, 50.0, 2.0])];
    assert_eq!(model.predict(&entities, 1).total.confidence, 0.85);
}
