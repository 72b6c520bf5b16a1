//! # Demand Math
//!
//! Numeric primitives for demand forecasting.
//! This crate provides the building blocks the forecasting models are made of:
//! trailing averages, population statistics, least-squares trend estimation,
//! min-max scaling and decimal rounding.

use thiserror::Error;

pub mod moving_averages;
pub mod regression;
pub mod rounding;
pub mod scaling;
pub mod statistics;

/// Errors that can occur in forecasting math
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for forecasting math operations
pub type Result<T> = std::result::Result<T, MathError>;
