//! Aggregate demand across many sub-entities
//!
//! Each sub-entity gets its own moving-average base. The aggregate figure for
//! day `i` is the summed base grown by the trend and by two lifecycle factors
//! (launch ramp-up, delisting decline). The per-entity breakdown uses the plain
//! trend extrapolation without the lifecycle factors, so the breakdown does not
//! sum to the aggregate beyond the lifecycle thresholds.

use crate::confidence::ConfidenceStrategy;
use crate::config::{ForecastConfig, LifecycleConfig};
use crate::data::EntitySeries;
use crate::error::{ForecastError, Result};
use crate::models::trend_extrapolation::{FittedTrend, TrendExtrapolation};
use crate::models::{Degeneracy, FittedModel, ForecastModel, ForecastResult, Prediction};
use chrono::NaiveDate;
use demand_math::rounding::round_half_up;
use std::collections::BTreeMap;

/// Aggregate forecast together with its per-entity breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatePrediction {
    pub total: Prediction,
    pub per_entity: BTreeMap<String, Vec<f64>>,
}

impl AggregatePrediction {
    /// Attach date labels and metadata
    pub fn into_result(self, today: NaiveDate, model_version: &str) -> ForecastResult {
        let mut result = self.total.into_result(today, model_version);
        result.per_entity_predictions = Some(self.per_entity);
        result
    }
}

/// Lifecycle-adjusted trend forecast summed over sub-entities
#[derive(Debug, Clone)]
pub struct AggregateDemand {
    trend: TrendExtrapolation,
    lifecycle: LifecycleConfig,
    /// Reported whenever any sub-entity has history
    confidence: f64,
}

impl AggregateDemand {
    pub fn new(trend: TrendExtrapolation, lifecycle: LifecycleConfig, confidence: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ForecastError::InvalidParameter(
                "Aggregate confidence must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            trend,
            lifecycle,
            confidence,
        })
    }

    /// Create the model from configuration
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        let trend = TrendExtrapolation::from_config(&config.trend)?.with_decimals(config.decimals);
        Self::new(trend, config.lifecycle, config.aggregate_confidence)
    }

    pub fn model_version(&self) -> &'static str {
        "aggregate-trend/1"
    }

    /// The aggregate reports its configured score rather than a computed one
    pub fn confidence_strategy(&self) -> ConfidenceStrategy {
        ConfidenceStrategy::Fixed
    }

    /// Forecast the summed demand and each entity's own demand
    pub fn predict(&self, entities: &[EntitySeries], horizon: usize) -> AggregatePrediction {
        let fitted: Vec<(&str, FittedTrend)> = entities
            .iter()
            .map(|entry| (entry.entity.name.as_str(), self.trend.fit(&entry.series)))
            .collect();

        let total_base: f64 = fitted.iter().map(|(_, fit)| fit.base()).sum();

        let values = (1..=horizon)
            .map(|day| {
                let demand = total_base
                    * self.trend.growth(day)
                    * self.lifecycle.launch_factor(day)
                    * self.lifecycle.delist_factor(day);
                round_half_up(demand, self.trend.decimals())
            })
            .collect();

        let mut per_entity = BTreeMap::new();
        for (name, fit) in &fitted {
            let previous = per_entity.insert(name.to_string(), fit.forecast(horizon).values);
            if previous.is_some() {
                tracing::warn!(entity = name, "duplicate entity name, keeping the later forecast");
            }
        }

        let has_history = entities.iter().any(|entry| !entry.series.is_empty());
        let (confidence, degeneracy) = if has_history {
            (self.confidence, None)
        } else {
            tracing::debug!(entities = entities.len(), "no sub-entity has history");
            (0.0, Some(Degeneracy::EmptySeries))
        };

        AggregatePrediction {
            total: Prediction {
                values,
                confidence,
                degeneracy,
            },
            per_entity,
        }
    }

    /// Predict and label the days after `today`
    pub fn forecast(&self, entities: &[EntitySeries], horizon: usize, today: NaiveDate) -> ForecastResult {
        self.predict(entities, horizon)
            .into_result(today, self.model_version())
    }
}
