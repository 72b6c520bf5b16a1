//! Calendar labels for forecast horizons

use chrono::{Local, NaiveDate};

/// ISO 8601 calendar date format used for labels
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Labels for the `horizon` days following `today`, oldest first.
///
/// ```
/// use chrono::NaiveDate;
/// use demand_forecast::dates::future_dates;
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
/// assert_eq!(future_dates(2, today), vec!["2024-01-11", "2024-01-12"]);
/// ```
pub fn future_dates(horizon: usize, today: NaiveDate) -> Vec<String> {
    today
        .iter_days()
        .skip(1)
        .take(horizon)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .collect()
}

/// Source of the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local system date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen on one date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
