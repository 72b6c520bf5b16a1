//! Prediction service: fetch history, pick a strategy, assemble the result

use crate::config::ForecastConfig;
use crate::data::{group_by_entity, TimeSeries};
use crate::dates::{Clock, SystemClock};
use crate::error::{ForecastError, Result};
use crate::models::aggregate::AggregateDemand;
use crate::models::sequence_extrapolation::SequenceExtrapolation;
use crate::models::trend_extrapolation::TrendExtrapolation;
use crate::models::{ForecastModel, ForecastResult};
use crate::provider::HistoricalDataProvider;
use chrono::{Days, NaiveDate, NaiveDateTime};

/// What a sales forecast is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalesTarget {
    /// One drug, from its recent order lines (trend extrapolation)
    Drug(i64),
    /// A stock item's outbound history (sequence extrapolation)
    Item { name: String, type_id: i64 },
}

/// What an inventory demand forecast is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemandTarget {
    /// Every catalog drug at one pharmacy (aggregate demand)
    Pharmacy(i64),
    /// A stock item's inventory history (sequence extrapolation)
    Item { name: String, type_id: i64 },
}

/// Forecasting entry point for the API layer
#[derive(Debug)]
pub struct PredictionService<P, C = SystemClock> {
    provider: P,
    clock: C,
    config: ForecastConfig,
    trend: TrendExtrapolation,
    sequence: SequenceExtrapolation,
    aggregate: AggregateDemand,
}

impl<P: HistoricalDataProvider> PredictionService<P, SystemClock> {
    /// Create a service using the system date and the given configuration
    pub fn new(provider: P, config: ForecastConfig) -> Result<Self> {
        Self::with_clock(provider, SystemClock, config)
    }
}

impl<P: HistoricalDataProvider, C: Clock> PredictionService<P, C> {
    /// Create a service with an explicit clock
    pub fn with_clock(provider: P, clock: C, config: ForecastConfig) -> Result<Self> {
        config.validate()?;

        let trend = TrendExtrapolation::from_config(&config.trend)?.with_decimals(config.decimals);
        let sequence =
            SequenceExtrapolation::from_config(&config.sequence)?.with_decimals(config.decimals);
        let aggregate = AggregateDemand::from_config(&config)?;

        Ok(Self {
            provider,
            clock,
            config,
            trend,
            sequence,
            aggregate,
        })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Predict sales volume for the next `horizon` days (configured default
    /// when `None`)
    #[tracing::instrument(skip(self))]
    pub fn predict_sales(&self, target: SalesTarget, horizon: Option<usize>) -> Result<ForecastResult> {
        let horizon = self.config.horizon_or_default(horizon);
        let today = self.clock.today();

        let result = match target {
            SalesTarget::Drug(drug_id) => {
                let (start, end) = self.lookback_range(today)?;
                let records = self
                    .provider
                    .historical_sales_by_drug_id(drug_id, start, end)?;
                let series = TimeSeries::from_records(&records)?;
                self.trend.forecast(&series, horizon, today)
            }
            SalesTarget::Item { name, type_id } => {
                let records = self.provider.historical_sales(&name, type_id)?;
                let series = TimeSeries::from_records(&records)?;
                self.sequence.forecast(&series, horizon, today)
            }
        };

        tracing::info!(
            horizon,
            confidence = result.confidence,
            degenerate = result.is_degenerate(),
            "sales forecast ready"
        );
        Ok(result)
    }

    /// Predict inventory demand for the next `horizon` days (configured
    /// default when `None`)
    #[tracing::instrument(skip(self))]
    pub fn predict_inventory_demand(
        &self,
        target: DemandTarget,
        horizon: Option<usize>,
    ) -> Result<ForecastResult> {
        let horizon = self.config.horizon_or_default(horizon);
        let today = self.clock.today();

        let result = match target {
            DemandTarget::Pharmacy(pharmacy_id) => {
                let (start, end) = self.lookback_range(today)?;
                let records = self
                    .provider
                    .pharmacy_historical_sales(pharmacy_id, start, end)?;
                let catalog = self.provider.list_all_entities()?;
                let entities = group_by_entity(&records, &catalog)?;
                self.aggregate.forecast(&entities, horizon, today)
            }
            DemandTarget::Item { name, type_id } => {
                let records = self.provider.historical_inventory(&name, type_id)?;
                let series = TimeSeries::from_records(&records)?;
                self.sequence.forecast(&series, horizon, today)
            }
        };

        tracing::info!(
            horizon,
            confidence = result.confidence,
            degenerate = result.is_degenerate(),
            "inventory demand forecast ready"
        );
        Ok(result)
    }

    /// Midnight `lookback_days` before today up to midnight today
    fn lookback_range(&self, today: NaiveDate) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let start = today
            .checked_sub_days(Days::new(u64::from(self.config.history.lookback_days)))
            .ok_or_else(|| {
                ForecastError::DataError(format!(
                    "Lookback of {} days before {} is out of range",
                    self.config.history.lookback_days, today
                ))
            })?;

        let midnight = |date: NaiveDate| {
            date.and_hms_opt(0, 0, 0)
                .ok_or_else(|| ForecastError::DataError(format!("No midnight on {}", date)))
        };

        Ok((midnight(start)?, midnight(today)?))
    }
}
