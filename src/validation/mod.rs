//! Validation of adjustments before they are persisted.
//!
//! [`validate`] runs the rules in [`rules`] in a fixed order and stops at the
//! first violation. Rules that only advise (the tax component overwrite) add a
//! warning to the returned [`ValidationReport`] instead of failing.

pub mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AdjustmentRecord, AuditWarning};
use crate::store::{EmployeeLookup, RecordStore, ReferralLookup};

pub use rules::{
    TAX_COMPONENT_OVERWRITE_WARNING, check_active_employee, check_amount, check_dates,
    check_duplicate_overwrite, check_employee_referral, check_recurring_overlap,
    check_salary_structure, check_tax_component_overwrite,
};

/// The outcome of a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Advisory warnings; they never block the write.
    pub warnings: Vec<AuditWarning>,
}

impl ValidationReport {
    /// Returns true if no warnings were raised.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validates a record against every business rule.
///
/// The record is expected to be normalized already; see [`validate_for_write`].
/// Rules run in this order: active employee, salary structure, dates, recurring
/// overlap, referral, duplicate overwrite, tax component, amount.
///
/// # Errors
///
/// Returns the first [`RuleViolation`](crate::error::RuleViolation) hit, or the
/// infrastructure error of a lookup that could not be answered.
///
/// # Examples
///
/// ```
/// use adjustment_engine::models::{
///     AdjustmentRecord, ComponentType, EmployeeProfile, EmployeeStatus, SalaryComponent,
/// };
/// use adjustment_engine::store::InMemoryStore;
/// use adjustment_engine::validation::validate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut store = InMemoryStore::new();
/// store.add_employee(EmployeeProfile {
///     id: "EMP-0001".to_string(),
///     status: EmployeeStatus::Active,
///     date_of_joining: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     relieving_date: None,
///     salary_structure_assigned: true,
/// });
///
/// let record = AdjustmentRecord::one_off(
///     "ADS-0001",
///     "EMP-0001",
///     SalaryComponent::new("Bonus", ComponentType::Earning),
///     NaiveDate::from_ymd_opt(2026, 1, 25).unwrap(),
///     Decimal::new(500, 0),
/// );
///
/// let report = validate(&record, &store, &store, &store).unwrap();
/// assert!(report.is_clean());
/// ```
pub fn validate(
    record: &AdjustmentRecord,
    store: &impl RecordStore,
    employees: &impl EmployeeLookup,
    referrals: &impl ReferralLookup,
) -> EngineResult<ValidationReport> {
    let mut report = ValidationReport::default();

    check_active_employee(record, employees)?;
    check_salary_structure(record, employees)?;
    check_dates(record, employees)?;
    check_recurring_overlap(record, store)?;
    check_employee_referral(record, referrals)?;
    check_duplicate_overwrite(record, store)?;
    if let Some(warning) = check_tax_component_overwrite(record)? {
        report.warnings.push(warning);
    }
    check_amount(record)?;

    debug!(
        adjustment = %record.id,
        employee = %record.employee,
        warnings = report.warnings.len(),
        "Adjustment passed validation"
    );
    Ok(report)
}

/// Normalizes the record for its mode, then validates it.
pub fn validate_for_write(
    record: &mut AdjustmentRecord,
    store: &impl RecordStore,
    employees: &impl EmployeeLookup,
    referrals: &impl ReferralLookup,
) -> EngineResult<ValidationReport> {
    record.normalize();
    validate(record, store, employees, referrals)
}

/// Re-validates a submitted record whose fields changed after submission.
///
/// Only the recurring overlap rule applies, and only while the record is enabled.
pub fn validate_update_after_submit(
    record: &AdjustmentRecord,
    store: &impl RecordStore,
) -> EngineResult<()> {
    if record.disabled {
        return Ok(());
    }
    check_recurring_overlap(record, store)
}
