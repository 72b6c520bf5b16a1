//! Access to historical sales and inventory records
//!
//! The engine reads history only through [`HistoricalDataProvider`]. Providers
//! return records sorted by ascending date; the engine rejects unsorted input
//! rather than sorting it.

use crate::data::{EntityDescriptor, HistoricalRecord};
use crate::error::Result;
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// Source of historical records
pub trait HistoricalDataProvider {
    /// Sales of one drug within `[start, end)`
    fn historical_sales_by_drug_id(
        &self,
        drug_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<HistoricalRecord>>;

    /// Sales of every drug at one pharmacy within `[start, end)`, each record
    /// carrying its drug id
    fn pharmacy_historical_sales(
        &self,
        pharmacy_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<HistoricalRecord>>;

    /// Outbound quantities of a stock item
    fn historical_sales(&self, name: &str, type_id: i64) -> Result<Vec<HistoricalRecord>>;

    /// Stock levels of a stock item
    fn historical_inventory(&self, name: &str, type_id: i64) -> Result<Vec<HistoricalRecord>>;

    /// Every known sub-entity, including those never sold
    fn list_all_entities(&self) -> Result<Vec<EntityDescriptor>>;
}

/// Provider backed by in-memory record sets, sorted on the way out
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    drug_sales: HashMap<i64, Vec<HistoricalRecord>>,
    pharmacy_sales: HashMap<i64, Vec<HistoricalRecord>>,
    item_sales: HashMap<(String, i64), Vec<HistoricalRecord>>,
    item_inventory: HashMap<(String, i64), Vec<HistoricalRecord>>,
    entities: Vec<EntityDescriptor>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add sales records for one drug
    pub fn with_drug_sales(mut self, drug_id: i64, records: Vec<HistoricalRecord>) -> Self {
        self.drug_sales.entry(drug_id).or_default().extend(records);
        self
    }

    /// Add sales records for one pharmacy; records should carry entity ids
    pub fn with_pharmacy_sales(mut self, pharmacy_id: i64, records: Vec<HistoricalRecord>) -> Self {
        self.pharmacy_sales
            .entry(pharmacy_id)
            .or_default()
            .extend(records);
        self
    }

    /// Add outbound records for a stock item
    pub fn with_item_sales(mut self, name: &str, type_id: i64, records: Vec<HistoricalRecord>) -> Self {
        self.item_sales
            .entry((name.to_string(), type_id))
            .or_default()
            .extend(records);
        self
    }

    /// Add stock-level records for a stock item
    pub fn with_item_inventory(
        mut self,
        name: &str,
        type_id: i64,
        records: Vec<HistoricalRecord>,
    ) -> Self {
        self.item_inventory
            .entry((name.to_string(), type_id))
            .or_default()
            .extend(records);
        self
    }

    /// Register a catalog entity
    pub fn with_entity(mut self, entity: EntityDescriptor) -> Self {
        self.entities.push(entity);
        self
    }
}

fn within(records: Option<&Vec<HistoricalRecord>>, start: NaiveDateTime, end: NaiveDateTime) -> Vec<HistoricalRecord> {
    let mut selected: Vec<HistoricalRecord> = records
        .into_iter()
        .flatten()
        .filter(|record| {
            record
                .date
                .and_hms_opt(0, 0, 0)
                .is_some_and(|at| at >= start && at < end)
        })
        .cloned()
        .collect();
    selected.sort_by_key(|record| record.date);
    selected
}

fn sorted(records: Option<&Vec<HistoricalRecord>>) -> Vec<HistoricalRecord> {
    let mut selected: Vec<HistoricalRecord> = records.into_iter().flatten().cloned().collect();
    selected.sort_by_key(|record| record.date);
    selected
}

impl HistoricalDataProvider for InMemoryProvider {
    fn historical_sales_by_drug_id(
        &self,
        drug_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<HistoricalRecord>> {
        Ok(within(self.drug_sales.get(&drug_id), start, end))
    }

    fn pharmacy_historical_sales(
        &self,
        pharmacy_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<HistoricalRecord>> {
        Ok(within(self.pharmacy_sales.get(&pharmacy_id), start, end))
    }

    fn historical_sales(&self, name: &str, type_id: i64) -> Result<Vec<HistoricalRecord>> {
        Ok(sorted(self.item_sales.get(&(name.to_string(), type_id))))
    }

    fn historical_inventory(&self, name: &str, type_id: i64) -> Result<Vec<HistoricalRecord>> {
        Ok(sorted(self.item_inventory.get(&(name.to_string(), type_id))))
    }

    fn list_all_entities(&self) -> Result<Vec<EntityDescriptor>> {
        Ok(self.entities.clone())
    }
}
