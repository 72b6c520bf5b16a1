use chrono::{Days, Local};
use demand_forecast::{
    DemandTarget, EntityDescriptor, ForecastConfig, ForecastResult, HistoricalRecord,
    InMemoryProvider, PredictionService, SalesTarget,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Demand Forecast: Basic Example");
    println!("==============================\n");

    let provider = create_sample_provider();
    let service = PredictionService::new(provider, ForecastConfig::default())?;

    println!("Sales forecast for drug 1 (trend extrapolation):");
    let drug = service.predict_sales(SalesTarget::Drug(1), Some(7))?;
    print_result(&drug);

    println!("\nSales forecast for item 'Gauze' (sequence extrapolation):");
    let item = service.predict_sales(
        SalesTarget::Item {
            name: "Gauze".to_string(),
            type_id: 2,
        },
        Some(7),
    )?;
    print_result(&item);

    println!("\nInventory demand for pharmacy 3 (aggregate):");
    let pharmacy = service.predict_inventory_demand(DemandTarget::Pharmacy(3), Some(7))?;
    print_result(&pharmacy);
    if let Some(breakdown) = &pharmacy.per_entity_predictions {
        for (name, values) in breakdown {
            println!("  {:<12} {:?}", name, values);
        }
    }

    println!("\nJSON payload:\n{}", pharmacy.to_json()?);

    Ok(())
}

fn print_result(result: &ForecastResult) {
    println!(
        "  model {} | confidence {:.3}{}",
        result.model_version,
        result.confidence,
        if result.is_degenerate() { " | degenerate input" } else { "" }
    );
    for (date, value) in result.dates.iter().zip(&result.predicted_values) {
        println!("  {}: {:.1}", date, value);
    }
}

fn create_sample_provider() -> InMemoryProvider {
    let today = Local::now().date_naive();
    let day = |back: u64| today.checked_sub_days(Days::new(back)).unwrap_or(today);

    let drug_sales: Vec<HistoricalRecord> = [10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0]
        .iter()
        .enumerate()
        .map(|(i, &q)| HistoricalRecord::new(day(7 - i as u64), q))
        .collect();

    let mut pharmacy_sales = Vec::new();
    for back in (1..=5).rev() {
        pharmacy_sales.push(HistoricalRecord::for_entity(day(back), 5.0, 1, "Aspirin"));
        pharmacy_sales.push(HistoricalRecord::for_entity(day(back), 3.0, 2, "Ibuprofen"));
    }

    let gauze: Vec<HistoricalRecord> = (1..=12u32)
        .map(|i| HistoricalRecord::new(day(13 - u64::from(i)), f64::from(i)))
        .collect();

    InMemoryProvider::new()
        .with_drug_sales(1, drug_sales)
        .with_pharmacy_sales(3, pharmacy_sales)
        .with_item_sales("Gauze", 2, gauze)
        .with_entity(EntityDescriptor::new(1, "Aspirin"))
        .with_entity(EntityDescriptor::new(2, "Ibuprofen"))
        .with_entity(EntityDescriptor::new(3, "Vitamin C"))
}
