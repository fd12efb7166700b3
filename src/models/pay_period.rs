//! Pay period model.
//!
//! A [`PayPeriod`] is the window a payroll run aggregates adjustments for.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::interval::{self, DateSpan};

/// Represents a pay period with its inclusive date range.
///
/// # Example
///
/// ```
/// use adjustment_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// )
/// .unwrap();
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()));
/// assert_eq!(period.days(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Creates a pay period, failing with `InvalidRange` if it ends before it starts.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let span = DateSpan::new(start_date, end_date)?;
        Ok(Self {
            start_date: span.start(),
            end_date: span.end(),
        })
    }

    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        interval::contains(self.start_date, self.end_date, date)
    }

    /// Number of days in the period.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
