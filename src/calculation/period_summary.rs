//! Per-period summary of an employee's adjustments.
//!
//! Combines [`select`](super::select) and [`prorate`](super::prorate) into the
//! amounts a payroll run needs: one line per applicable adjustment, rounded to
//! currency precision, plus additive and overwrite totals.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineResult, RuleViolation};
use crate::models::{
    AdjustmentLine, AdjustmentRecord, AdjustmentTotals, AuditStep, AuditTrace, AuditWarning,
    ComponentType, PayPeriod, PeriodAdjustments,
};
use crate::store::RecordStore;
use crate::validation::TAX_COMPONENT_OVERWRITE_WARNING;

use super::{prorate, select};

/// Rounds an amount to `precision` decimal places, halves away from zero.
pub fn round_to_precision(amount: Decimal, precision: u32) -> Decimal {
    amount.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
}

/// Resolves every applicable adjustment of an employee for one period.
///
/// Recurring adjustments contribute their prorated share, one-off adjustments
/// their full amount. Line amounts are rounded to `precision` decimal places
/// and the totals are sums of the rounded lines.
///
/// # Errors
///
/// Propagates `MultipleOverwritesInPeriod` from selection, proration failures,
/// and store lookup failures. Fails with `AmountOverflow` if a total exceeds the
/// decimal range.
pub fn summarize_period(
    store: &impl RecordStore,
    employee: &str,
    period: &PayPeriod,
    component_type: ComponentType,
    precision: u32,
) -> EngineResult<PeriodAdjustments> {
    let start_time = Instant::now();
    let selected = select(store, employee, period, component_type)?;

    let mut steps: Vec<AuditStep> = Vec::with_capacity(selected.len() + 1);
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut lines: Vec<AdjustmentLine> = Vec::with_capacity(selected.len());
    let mut step_number: u32 = 1;

    steps.push(AuditStep {
        step_number,
        rule_id: "adjustment_selection".to_string(),
        rule_name: "Adjustment Selection".to_string(),
        input: serde_json::json!({
            "employee": employee,
            "component_type": component_type.to_string(),
            "period_start": period.start_date.to_string(),
            "period_end": period.end_date.to_string()
        }),
        output: serde_json::json!({
            "selected": selected.iter().map(|r| r.id.as_str()).collect::<Vec<_>>()
        }),
        reasoning: format!(
            "{} submitted {} adjustment(s) apply between {} and {}",
            selected.len(),
            component_type,
            period.start_date,
            period.end_date
        ),
    });
    step_number += 1;

    for record in &selected {
        let (raw_amount, audit_step) = if record.is_recurring {
            let result = prorate(record, period, step_number)?;
            (result.amount, result.audit_step)
        } else {
            (record.amount, one_off_step(record, step_number))
        };
        steps.push(audit_step);
        step_number += 1;

        if record.overwrite_salary_structure_amount
            && record.salary_component.variable_based_on_taxable_salary
        {
            warnings.push(AuditWarning {
                code: TAX_COMPONENT_OVERWRITE_WARNING.to_string(),
                message: format!(
                    "Adjustment '{}' overwrites tax component '{}'",
                    record.id,
                    record.component_name()
                ),
                severity: "medium".to_string(),
            });
        }

        lines.push(AdjustmentLine {
            adjustment_id: record.id.clone(),
            salary_component: record.component_name().to_string(),
            is_recurring: record.is_recurring,
            overwrite: record.overwrite_salary_structure_amount,
            deduct_full_tax_on_selected_payroll_date: record
                .deduct_full_tax_on_selected_payroll_date,
            full_amount: record.amount,
            amount: round_to_precision(raw_amount, precision),
        });
    }

    let additive_total = line_total(&lines, false, employee)?;
    let overwrite_total = line_total(&lines, true, employee)?;

    let duration_us = start_time.elapsed().as_micros() as u64;
    info!(
        employee = %employee,
        component_type = %component_type,
        lines = lines.len(),
        additive_total = %additive_total,
        overwrite_total = %overwrite_total,
        duration_us = duration_us,
        "Period adjustments resolved"
    );

    Ok(PeriodAdjustments {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee.to_string(),
        component_type,
        pay_period: *period,
        lines,
        totals: AdjustmentTotals {
            additive_total,
            overwrite_total,
        },
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    })
}

/// Sums the rounded line amounts of one kind.
fn line_total(lines: &[AdjustmentLine], overwrite: bool, employee: &str) -> EngineResult<Decimal> {
    lines
        .iter()
        .filter(|l| l.overwrite == overwrite)
        .try_fold(Decimal::ZERO, |total, l| total.checked_add(l.amount))
        .ok_or_else(|| {
            RuleViolation::AmountOverflow {
                operation: "period totals",
                subject: employee.to_string(),
            }
            .into()
        })
}

fn one_off_step(record: &AdjustmentRecord, step_number: u32) -> AuditStep {
    let payroll_date = record
        .payroll_date
        .map(|d| d.to_string())
        .unwrap_or_default();
    AuditStep {
        step_number,
        rule_id: "one_off_amount".to_string(),
        rule_name: "One-off Amount".to_string(),
        input: serde_json::json!({
            "adjustment_id": record.id,
            "amount": record.amount.normalize().to_string(),
            "payroll_date": payroll_date
        }),
        output: serde_json::json!({
            "amount": record.amount.normalize().to_string()
        }),
        reasoning: format!(
            "One-off adjustment paid in full on {}: {}",
            payroll_date,
            record.amount.normalize()
        ),
    }
}
