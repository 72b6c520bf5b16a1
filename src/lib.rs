//! # Demand Forecast Workspace
//!
//! Facade over the workspace crates:
//!
//! - [`math`]: numeric primitives (`demand_math`)
//! - [`forecast`]: the forecasting engine and prediction service (`demand_forecast`)
//!
//! ## Example
//!
//! ```
//! use demand_forecast_workspace::forecast::{InMemoryProvider, PredictionService, SalesTarget};
//! use demand_forecast_workspace::forecast::dates::FixedClock;
//! use demand_forecast_workspace::forecast::ForecastConfig;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
//! let service = PredictionService::with_clock(
//!     InMemoryProvider::new(),
//!     FixedClock(today),
//!     ForecastConfig::default(),
//! ).unwrap();
//!
//! // No history: zero-filled forecast with zero confidence
//! let result = service.predict_sales(SalesTarget::Drug(7), Some(3)).unwrap();
//! assert_eq!(result.predicted_values, vec![0.0, 0.0, 0.0]);
//! assert_eq!(result.confidence, 0.0);
//! ```

pub use demand_forecast as forecast;
pub use demand_math as math;
