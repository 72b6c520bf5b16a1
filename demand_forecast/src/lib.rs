//! # Demand Forecast
//!
//! Sales and inventory demand forecasting for pharmacy and warehouse stock.
//!
//! ## Features
//!
//! - Trend extrapolation: a moving-average base grown by a fixed daily rate
//! - Sequence extrapolation: min-max normalized sliding windows with a
//!   least-squares trend, mapped back onto the original scale
//! - Aggregate pharmacy demand with product launch and delisting factors
//! - Heuristic confidence scores in `[0, 1]`
//! - Forecast date labels, JSON-serializable results
//!
//! Degenerate input (no history, too little history) never fails; it produces
//! zero-based output with [`ForecastResult::degeneracy`] set.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use demand_forecast::data::TimeSeries;
//! use demand_forecast::models::trend_extrapolation::TrendExtrapolation;
//! use demand_forecast::models::ForecastModel;
//!
//! let series = TimeSeries::new(vec![10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0])?;
//! let model = TrendExtrapolation::new(7, 0.05)?;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! let result = model.forecast(&series, 3, today);
//!
//! assert_eq!(result.predicted_values[0], 13.7);
//! assert_eq!(result.dates[0], "2024-01-11");
//! # Ok::<(), demand_forecast::ForecastError>(())
//! ```

pub mod confidence;
pub mod config;
pub mod data;
pub mod dates;
pub mod error;
pub mod models;
pub mod provider;
pub mod service;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, EntityDescriptor, HistoricalRecord, TimeSeries};
pub use crate::error::ForecastError;
pub use crate::models::{Degeneracy, FittedModel, ForecastModel, ForecastResult, Prediction};
pub use crate::provider::{HistoricalDataProvider, InMemoryProvider};
pub use crate::service::{DemandTarget, PredictionService, SalesTarget};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
