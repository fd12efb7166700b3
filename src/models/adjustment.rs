//! The additional salary adjustment record.
//!
//! An [`AdjustmentRecord`] is either one-off (defined by a single payroll date) or
//! recurring (defined by an inclusive date range). [`AdjustmentRecord::normalize`]
//! clears the fields of the inactive mode and must run before every validation.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::interval::DateSpan;

use super::{ComponentType, SalaryComponent};

/// Document status driving which lifecycle hooks fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    /// Saved but not yet effective.
    #[default]
    Draft,
    /// Effective; picked up by payroll.
    Submitted,
    /// Reversed after submission.
    Cancelled,
}

impl fmt::Display for DocStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocStatus::Draft => write!(f, "draft"),
            DocStatus::Submitted => write!(f, "submitted"),
            DocStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// The record an adjustment originated from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "doctype", content = "name", rename_all = "snake_case")]
pub enum Reference {
    /// Created directly.
    #[default]
    None,
    /// Recovers an employee advance; submit/cancel adjust its return amount.
    EmployeeAdvance(String),
    /// Pays a referral bonus; submit/cancel flip its payment status.
    EmployeeReferral(String),
}

/// One additional salary adjustment for an employee.
///
/// # Example
///
/// ```
/// use adjustment_engine::models::{AdjustmentRecord, ComponentType, SalaryComponent};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut record = AdjustmentRecord::one_off(
///     "ADS-0001",
///     "EMP-0001",
///     SalaryComponent::new("Bonus", ComponentType::Earning),
///     NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
///     Decimal::new(500, 0),
/// );
/// record.from_date = NaiveDate::from_ymd_opt(2026, 1, 1);
/// record.normalize();
/// assert!(record.from_date.is_none());
/// assert!(record.payroll_date.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentRecord {
    /// Unique identifier.
    pub id: String,
    /// The employee this adjustment pays or deducts.
    pub employee: String,
    /// The pay component the adjustment applies to.
    pub salary_component: SalaryComponent,
    /// Recurring adjustments use the date range, one-off adjustments the payroll date.
    #[serde(default)]
    pub is_recurring: bool,
    /// The payroll date of a one-off adjustment.
    #[serde(default)]
    pub payroll_date: Option<NaiveDate>,
    /// The first day of a recurring adjustment.
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    /// The last day of a recurring adjustment.
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    /// The adjustment amount; never negative once validated.
    pub amount: Decimal,
    /// Replace the structure-computed amount instead of adding to it.
    #[serde(default)]
    pub overwrite_salary_structure_amount: bool,
    /// Passed through to the payroll engine untouched.
    #[serde(default)]
    pub deduct_full_tax_on_selected_payroll_date: bool,
    /// Disabled records stay stored but are ignored by overlap and aggregation.
    #[serde(default)]
    pub disabled: bool,
    /// The originating record, if any.
    #[serde(default)]
    pub reference: Reference,
    /// The document status.
    #[serde(default)]
    pub doc_status: DocStatus,
}

impl AdjustmentRecord {
    /// Creates a draft one-off adjustment with overwrite disabled.
    pub fn one_off(
        id: impl Into<String>,
        employee: impl Into<String>,
        salary_component: SalaryComponent,
        payroll_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            employee: employee.into(),
            salary_component,
            is_recurring: false,
            payroll_date: Some(payroll_date),
            from_date: None,
            to_date: None,
            amount,
            overwrite_salary_structure_amount: false,
            deduct_full_tax_on_selected_payroll_date: false,
            disabled: false,
            reference: Reference::None,
            doc_status: DocStatus::Draft,
        }
    }

    /// Creates a draft recurring adjustment with overwrite disabled.
    pub fn recurring(
        id: impl Into<String>,
        employee: impl Into<String>,
        salary_component: SalaryComponent,
        from_date: NaiveDate,
        to_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            employee: employee.into(),
            salary_component,
            is_recurring: true,
            payroll_date: None,
            from_date: Some(from_date),
            to_date: Some(to_date),
            amount,
            overwrite_salary_structure_amount: false,
            deduct_full_tax_on_selected_payroll_date: false,
            disabled: false,
            reference: Reference::None,
            doc_status: DocStatus::Draft,
        }
    }

    /// Clears the date fields that do not belong to the record's mode.
    ///
    /// Recurring records lose their payroll date; one-off records lose their range.
    /// Running it more than once has no further effect.
    pub fn normalize(&mut self) {
        if self.is_recurring {
            self.payroll_date = None;
        } else {
            self.from_date = None;
            self.to_date = None;
        }
    }

    /// The salary component name.
    pub fn component_name(&self) -> &str {
        &self.salary_component.name
    }

    /// The salary component type.
    pub fn component_type(&self) -> ComponentType {
        self.salary_component.component_type
    }

    /// Returns true if the record is submitted and not disabled.
    pub fn is_effective(&self) -> bool {
        self.doc_status == DocStatus::Submitted && !self.disabled
    }

    /// The `[from_date, to_date]` range, if both ends are set and ordered.
    pub fn date_range(&self) -> Option<DateSpan> {
        match (self.from_date, self.to_date) {
            (Some(from), Some(to)) => DateSpan::new(from, to).ok(),
            _ => None,
        }
    }

    /// The days this record pays for: its range when recurring, its payroll date otherwise.
    pub fn coverage(&self) -> Option<DateSpan> {
        if self.is_recurring {
            self.date_range()
        } else {
            self.payroll_date.map(DateSpan::single)
        }
    }
}
