//! Historical quantity data handling for forecasting

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A dated quantity observation as returned by the data provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// Day the quantity was recorded
    pub date: NaiveDate,
    /// Quantity sold or held; `None` when the source column was null
    pub quantity: Option<f64>,
    /// Sub-entity (drug or item) the record belongs to
    #[serde(default)]
    pub entity_id: Option<i64>,
    /// Display name of the sub-entity
    #[serde(default)]
    pub entity_name: Option<String>,
}

impl HistoricalRecord {
    /// Create a record without sub-entity information
    pub fn new(date: NaiveDate, quantity: f64) -> Self {
        Self {
            date,
            quantity: Some(quantity),
            entity_id: None,
            entity_name: None,
        }
    }

    /// Create a record attributed to a sub-entity
    pub fn for_entity(date: NaiveDate, quantity: f64, entity_id: i64, entity_name: &str) -> Self {
        Self {
            date,
            quantity: Some(quantity),
            entity_id: Some(entity_id),
            entity_name: Some(entity_name.to_string()),
        }
    }
}

/// Catalog entry for a sub-entity (a drug or stock item)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub id: i64,
    pub name: String,
}

impl EntityDescriptor {
    pub fn new(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// Chronologically ordered, non-negative quantity series
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series from quantities already in chronological order
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ForecastError::ValidationError(format!(
                "Quantity at position {} must be finite and non-negative, got {}",
                index, value
            )));
        }

        Ok(Self { values })
    }

    /// A series with no observations
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from provider records.
    ///
    /// Records must already be sorted by date (ties allowed); sorting is the
    /// provider's job. Null quantities are skipped.
    pub fn from_records(records: &[HistoricalRecord]) -> Result<Self> {
        if let Some(position) = records.windows(2).position(|w| w[1].date < w[0].date) {
            return Err(ForecastError::ValidationError(format!(
                "Records are not in ascending date order: {} follows {}",
                records[position + 1].date,
                records[position].date
            )));
        }

        let values: Vec<f64> = records.iter().filter_map(|r| r.quantity).collect();
        let skipped = records.len() - values.len();
        if skipped > 0 {
            tracing::debug!(skipped, "skipped records with null quantity");
        }

        Self::new(values)
    }

    /// The quantities, oldest first
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One sub-entity and its own history
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySeries {
    pub entity: EntityDescriptor,
    pub series: TimeSeries,
}

/// Split mixed records into one series per catalog entity.
///
/// Every catalog entry is returned, in catalog order, with an empty series
/// when it has no records. A catalog id listed more than once is kept at its
/// first position only. Records for entities outside the catalog, or without
/// an entity id, are ignored.
pub fn group_by_entity(
    records: &[HistoricalRecord],
    catalog: &[EntityDescriptor],
) -> Result<Vec<EntitySeries>> {
    let mut grouped: HashMap<i64, Vec<HistoricalRecord>> = HashMap::new();
    let mut unattributed = 0usize;

    for record in records {
        match record.entity_id {
            Some(id) => grouped.entry(id).or_default().push(record.clone()),
            None => unattributed += 1,
        }
    }

    if unattributed > 0 {
        tracing::debug!(unattributed, "ignored records without an entity id");
    }

    let mut seen = HashSet::new();
    let entities = catalog
        .iter()
        .filter(|entity| {
            let first = seen.insert(entity.id);
            if !first {
                tracing::debug!(entity_id = entity.id, "skipped repeated catalog entry");
            }
            first
        })
        .map(|entity| {
            let series = match grouped.remove(&entity.id) {
                Some(entity_records) => TimeSeries::from_records(&entity_records)?,
                None => TimeSeries::empty(),
            };
            Ok(EntitySeries {
                entity: entity.clone(),
                series,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if !grouped.is_empty() {
        tracing::debug!(
            uncatalogued = grouped.len(),
            "ignored records for entities missing from the catalog"
        );
    }

    Ok(entities)
}

/// Loader for historical records stored as CSV
///
/// Expected columns: `date,quantity,entity_id,entity_name`; the last two may
/// be omitted or empty and an empty quantity is read as null.
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load records from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<HistoricalRecord>> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Load records from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<HistoricalRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = csv_reader
            .deserialize()
            .collect::<std::result::Result<Vec<HistoricalRecord>, csv::Error>>()?;

        if records.is_empty() {
            tracing::debug!("CSV source contained no records");
        }

        Ok(records)
    }
}
