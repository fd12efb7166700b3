//! Selection of the adjustments that apply to a pay period.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{EngineResult, RuleViolation};
use crate::models::{AdjustmentRecord, ComponentType, PayPeriod};
use crate::store::RecordStore;

/// Returns true if the record is paid in the period.
///
/// A recurring record applies when it started by the period end and is still
/// running on the last day of the period. A one-off record applies when its
/// payroll date falls inside the period.
pub fn is_applicable(record: &AdjustmentRecord, period: &PayPeriod) -> bool {
    if !record.is_effective() {
        return false;
    }

    if record.is_recurring {
        match (record.from_date, record.to_date) {
            (Some(from), Some(to)) => from <= period.end_date && to >= period.end_date,
            _ => false,
        }
    } else {
        record
            .payroll_date
            .is_some_and(|date| period.contains_date(date))
    }
}

/// Returns every applicable adjustment of an employee for a period and component
/// type, in store order.
///
/// # Errors
///
/// Fails with `MultipleOverwritesInPeriod` when a second overwrite-enabled record
/// is found for a component already overwritten in the period.
pub fn select(
    store: &impl RecordStore,
    employee: &str,
    period: &PayPeriod,
    component_type: ComponentType,
) -> EngineResult<Vec<AdjustmentRecord>> {
    let selected: Vec<AdjustmentRecord> = store
        .query(employee, component_type, period)?
        .into_iter()
        .filter(|r| r.employee == employee && r.component_type() == component_type)
        .filter(|r| is_applicable(r, period))
        .collect();

    let mut overwritten: HashSet<&str> = HashSet::new();
    for record in selected.iter().filter(|r| r.overwrite_salary_structure_amount) {
        if !overwritten.insert(record.component_name()) {
            return Err(RuleViolation::MultipleOverwritesInPeriod {
                component: record.component_name().to_string(),
                period_start: period.start_date,
                period_end: period.end_date,
            }
            .into());
        }
    }

    debug!(
        employee = %employee,
        component_type = %component_type,
        selected = selected.len(),
        "Selected adjustments for period"
    );
    Ok(selected)
}
