//! Employee master data used by the validation rules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents the employee's status in the master data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed.
    #[default]
    Active,
    /// Marked inactive; no adjustments may be created.
    Inactive,
    /// Temporarily suspended.
    Suspended,
    /// Has left; bounded by the relieving date instead of the status.
    Left,
}

/// The slice of an employee record the engine needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's status.
    #[serde(default)]
    pub status: EmployeeStatus,
    /// The first day of employment.
    pub date_of_joining: NaiveDate,
    /// The last day of employment, if known.
    #[serde(default)]
    pub relieving_date: Option<NaiveDate>,
    /// Whether at least one salary structure assignment exists.
    #[serde(default)]
    pub salary_structure_assigned: bool,
}

impl EmployeeProfile {
    /// Returns false only for employees marked inactive.
    ///
    /// # Examples
    ///
    /// ```
    /// use adjustment_engine::models::{EmployeeProfile, EmployeeStatus};
    /// use chrono::NaiveDate;
    ///
    /// let employee = EmployeeProfile {
    ///     id: "EMP-0001".to_string(),
    ///     status: EmployeeStatus::Left,
    ///     date_of_joining: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    ///     relieving_date: NaiveDate::from_ymd_opt(2026, 3, 31),
    ///     salary_structure_assigned: true,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status != EmployeeStatus::Inactive
    }
}
