//! The individual business rules applied to an adjustment before it is persisted.
//!
//! Each rule is a standalone function so it can be exercised on its own; the
//! order they run in is fixed by [`super::validate`].

use tracing::warn;

use crate::error::{EmploymentBound, EngineResult, RuleViolation};
use crate::interval::DateSpan;
use crate::models::{AdjustmentRecord, AuditWarning, ComponentType, Reference, ReferralStatus};
use crate::store::{EmployeeLookup, RecordStore, ReferralLookup};

/// Warning code raised when a tax-variable component is overwritten.
pub const TAX_COMPONENT_OVERWRITE_WARNING: &str = "TAX_COMPONENT_OVERWRITE";

/// The `[from_date, to_date]` span of a recurring record.
fn recurring_span(record: &AdjustmentRecord) -> EngineResult<DateSpan> {
    let from = record.from_date.ok_or_else(|| RuleViolation::MissingDate {
        record: record.id.clone(),
        field: "from_date",
    })?;
    let to = record.to_date.ok_or_else(|| RuleViolation::MissingDate {
        record: record.id.clone(),
        field: "to_date",
    })?;
    DateSpan::new(from, to)
}

/// The days the record pays for, failing if the dates its mode needs are absent.
fn required_coverage(record: &AdjustmentRecord) -> EngineResult<DateSpan> {
    if record.is_recurring {
        return recurring_span(record);
    }
    let payroll_date = record.payroll_date.ok_or_else(|| RuleViolation::MissingDate {
        record: record.id.clone(),
        field: "payroll_date",
    })?;
    Ok(DateSpan::single(payroll_date))
}

/// Rule 1: the employee must be active.
pub fn check_active_employee(
    record: &AdjustmentRecord,
    employees: &impl EmployeeLookup,
) -> EngineResult<()> {
    if !employees.is_active(&record.employee)? {
        return Err(RuleViolation::InactiveEmployee {
            employee: record.employee.clone(),
        }
        .into());
    }
    Ok(())
}

/// Rule 2: the employee must have a salary structure assignment.
pub fn check_salary_structure(
    record: &AdjustmentRecord,
    employees: &impl EmployeeLookup,
) -> EngineResult<()> {
    if !employees.has_salary_structure_assignment(&record.employee)? {
        return Err(RuleViolation::NoSalaryStructure {
            employee: record.employee.clone(),
        }
        .into());
    }
    Ok(())
}

/// Rule 3: the dates of the record's mode are present, ordered, and inside the
/// employee's employment window.
pub fn check_dates(record: &AdjustmentRecord, employees: &impl EmployeeLookup) -> EngineResult<()> {
    required_coverage(record)?;

    let (date_of_joining, relieving_date) =
        employees.joining_and_relieving_dates(&record.employee)?;

    let out_of_window = |field: &'static str, date, bound| RuleViolation::DateOutOfEmploymentWindow {
        employee: record.employee.clone(),
        field,
        date,
        bound,
    };

    let (start_field, start, end_field, end) = if record.is_recurring {
        ("from_date", record.from_date, "to_date", record.to_date)
    } else {
        (
            "payroll_date",
            record.payroll_date,
            "payroll_date",
            record.payroll_date,
        )
    };

    if let Some(start) = start.filter(|d| *d < date_of_joining) {
        return Err(out_of_window(start_field, start, EmploymentBound::Joining(date_of_joining)).into());
    }

    if let Some(relieving_date) = relieving_date {
        if let Some(end) = end.filter(|d| *d > relieving_date) {
            return Err(
                out_of_window(end_field, end, EmploymentBound::Relieving(relieving_date)).into(),
            );
        }
    }

    Ok(())
}

/// Rule 4: a recurring record must not overlap another effective recurring record
/// for the same employee and component.
pub fn check_recurring_overlap(
    record: &AdjustmentRecord,
    store: &impl RecordStore,
) -> EngineResult<()> {
    if !record.is_recurring {
        return Ok(());
    }

    let span = recurring_span(record)?;
    let conflicting = store.find_overlapping_recurring(
        &record.employee,
        record.component_name(),
        &record.id,
        span,
    )?;

    if !conflicting.is_empty() {
        return Err(RuleViolation::RecurringOverlap {
            conflicting,
            component: record.component_name().to_string(),
            from_date: span.start(),
            to_date: span.end(),
        }
        .into());
    }
    Ok(())
}

/// Rule 5: a referral bonus needs a bonus-applicable, accepted referral and an
/// earning component.
pub fn check_employee_referral(
    record: &AdjustmentRecord,
    referrals: &impl ReferralLookup,
) -> EngineResult<()> {
    let Reference::EmployeeReferral(referral_id) = &record.reference else {
        return Ok(());
    };

    let referral = referrals.get_referral(referral_id)?;

    if !referral.applicable_for_bonus {
        return Err(RuleViolation::ReferralNotApplicable {
            referral: referral_id.clone(),
        }
        .into());
    }

    if record.component_type() == ComponentType::Deduction {
        return Err(RuleViolation::ReferralRequiresEarning {
            component: record.component_name().to_string(),
        }
        .into());
    }

    if referral.status != ReferralStatus::Accepted {
        return Err(RuleViolation::ReferralNotAccepted {
            referral: referral_id.clone(),
            status: referral.status.to_string(),
        }
        .into());
    }

    Ok(())
}

/// Rule 6: only one effective overwrite-enabled record may cover any given date
/// for the same employee and component.
pub fn check_duplicate_overwrite(
    record: &AdjustmentRecord,
    store: &impl RecordStore,
) -> EngineResult<()> {
    if !record.overwrite_salary_structure_amount {
        return Ok(());
    }

    let coverage = required_coverage(record)?;
    if let Some(conflicting) = store.find_overwrite_conflict(
        &record.employee,
        record.component_name(),
        &record.id,
        coverage,
    )? {
        return Err(RuleViolation::DuplicateOverwrite {
            component: record.component_name().to_string(),
            conflicting,
        }
        .into());
    }
    Ok(())
}

/// Rule 7: a tax-variable component must be overwritten.
///
/// Returns an advisory warning when the overwrite is in place, since tax will then
/// no longer be computed from the income tax slabs.
pub fn check_tax_component_overwrite(
    record: &AdjustmentRecord,
) -> EngineResult<Option<AuditWarning>> {
    if !record.salary_component.variable_based_on_taxable_salary {
        return Ok(None);
    }

    if !record.overwrite_salary_structure_amount {
        return Err(RuleViolation::TaxComponentRequiresOverwrite {
            component: record.component_name().to_string(),
        }
        .into());
    }

    warn!(
        adjustment = %record.id,
        component = %record.component_name(),
        "Adjustment overwrites a tax component"
    );
    Ok(Some(AuditWarning {
        code: TAX_COMPONENT_OVERWRITE_WARNING.to_string(),
        message: format!(
            "This will overwrite the tax component '{}' in the salary slip and tax won't be calculated based on the income tax slabs",
            record.component_name()
        ),
        severity: "medium".to_string(),
    }))
}

/// Rule 8: the amount must not be negative.
pub fn check_amount(record: &AdjustmentRecord) -> EngineResult<()> {
    if record.amount.is_sign_negative() && !record.amount.is_zero() {
        return Err(RuleViolation::NegativeAmount {
            amount: record.amount,
        }
        .into());
    }
    Ok(())
}
