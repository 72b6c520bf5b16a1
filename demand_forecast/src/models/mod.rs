//! Forecasting models for quantity series

use crate::confidence::ConfidenceStrategy;
use crate::data::TimeSeries;
use crate::dates::future_dates;
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Why a forecast fell back to trivial output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Degeneracy {
    /// No observations at all
    EmptySeries,
    /// Fewer observations than the model needs for its full computation
    InsufficientHistory { required: usize, available: usize },
}

/// Model output before calendar dates are attached
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// One rounded value per forecast day
    pub values: Vec<f64>,
    /// Heuristic confidence in `[0, 1]`
    pub confidence: f64,
    /// Set when the input was too small for the full computation
    pub degeneracy: Option<Degeneracy>,
}

impl Prediction {
    /// Attach date labels and metadata
    pub fn into_result(self, today: NaiveDate, model_version: &str) -> ForecastResult {
        let dates = future_dates(self.values.len(), today);
        ForecastResult {
            predicted_values: self.values,
            dates,
            confidence: self.confidence,
            per_entity_predictions: None,
            model_version: model_version.to_string(),
            created_at: Utc::now(),
            degeneracy: self.degeneracy,
        }
    }
}

/// Forecast bundle returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResult {
    /// Predicted quantity per forecast day
    pub predicted_values: Vec<f64>,
    /// `yyyy-MM-dd` label for each predicted value
    pub dates: Vec<String>,
    /// Heuristic confidence in `[0, 1]`
    pub confidence: f64,
    /// Per sub-entity forecasts, present for aggregate demand only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub per_entity_predictions: Option<BTreeMap<String, Vec<f64>>>,
    /// Strategy and revision that produced the result
    pub model_version: String,
    pub created_at: DateTime<Utc>,
    /// Set when the forecast is a degenerate fallback
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub degeneracy: Option<Degeneracy>,
}

impl ForecastResult {
    /// Number of forecast days
    pub fn horizon(&self) -> usize {
        self.predicted_values.len()
    }

    pub fn is_degenerate(&self) -> bool {
        self.degeneracy.is_some()
    }

    /// Serialize to JSON with camelCase keys
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A model fitted to one series, ready to extrapolate
pub trait FittedModel: Debug {
    /// Extrapolate `horizon` days beyond the series
    fn forecast(&self, horizon: usize) -> Prediction;

    /// Confidence of any forecast from this fit
    fn confidence(&self) -> f64;

    /// Set when the series was too small for the full computation
    fn degeneracy(&self) -> Option<Degeneracy>;
}

/// Forecast strategy that can be fitted to a quantity series.
///
/// Fitting never fails: empty or short series degrade to zero-filled output
/// flagged through [`FittedModel::degeneracy`].
pub trait ForecastModel: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedModel;

    /// Fit the model to a chronologically ordered series
    fn fit(&self, series: &TimeSeries) -> Self::Fitted;

    /// Get the name of the model
    fn name(&self) -> &str;

    /// Version label stored on results
    fn model_version(&self) -> &'static str;

    /// Confidence formula used by this model
    fn confidence_strategy(&self) -> ConfidenceStrategy;

    /// Fit and extrapolate in one step
    fn predict(&self, series: &TimeSeries, horizon: usize) -> Prediction {
        self.fit(series).forecast(horizon)
    }

    /// Fit, extrapolate and label the days after `today`
    fn forecast(&self, series: &TimeSeries, horizon: usize, today: NaiveDate) -> ForecastResult {
        self.predict(series, horizon)
            .into_result(today, self.model_version())
    }
}

pub mod aggregate;
pub mod sequence_extrapolation;
pub mod trend_extrapolation;
