//! Closed date interval arithmetic.
//!
//! All intervals in the engine are inclusive on both ends: an adjustment running
//! from January 1st to January 31st covers 31 days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineResult, RuleViolation};

/// Counts the days from `start` to `end`, both inclusive.
///
/// Fails with `InvalidRange` when `end` is before `start`.
///
/// # Example
///
/// ```
/// use adjustment_engine::interval::inclusive_days;
/// use chrono::NaiveDate;
///
/// let jan_1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let jan_31 = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
/// assert_eq!(inclusive_days(jan_1, jan_31).unwrap(), 31);
/// assert_eq!(inclusive_days(jan_1, jan_1).unwrap(), 1);
/// assert!(inclusive_days(jan_31, jan_1).is_err());
/// ```
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> EngineResult<i64> {
    if end < start {
        return Err(RuleViolation::InvalidRange { start, end }.into());
    }
    Ok((end - start).num_days() + 1)
}

/// Returns true if the closed intervals `[a_start, a_end]` and `[b_start, b_end]`
/// share at least one day.
pub fn overlaps(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_end >= b_start && a_start <= b_end
}

/// Returns true if `point` lies within `[start, end]`.
pub fn contains(start: NaiveDate, end: NaiveDate, point: NaiveDate) -> bool {
    start <= point && point <= end
}

/// A closed, non-empty date interval.
///
/// The constructor guarantees `start <= end`, so [`DateSpan::days`] never fails.
///
/// # Example
///
/// ```
/// use adjustment_engine::interval::DateSpan;
/// use chrono::NaiveDate;
///
/// let january = DateSpan::new(
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// )
/// .unwrap();
/// let payday = DateSpan::single(NaiveDate::from_ymd_opt(2026, 1, 25).unwrap());
///
/// assert!(january.overlaps(&payday));
/// assert_eq!(january.days(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateSpan {
    /// Creates a span, failing with `InvalidRange` if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> EngineResult<Self> {
        if end < start {
            return Err(RuleViolation::InvalidRange { start, end }.into());
        }
        Ok(Self { start, end })
    }

    /// Creates a one-day span.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// The first day of the span.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The last day of the span.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if both spans share at least one day.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    /// Returns true if `date` lies within the span.
    pub fn contains(&self, date: NaiveDate) -> bool {
        contains(self.start, self.end, date)
    }

    /// Number of days in the span, both ends inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}
