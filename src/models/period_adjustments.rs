//! Period aggregation result models.
//!
//! This module contains the [`PeriodAdjustments`] type returned when all applicable
//! adjustments of an employee are resolved for one pay period, together with the
//! audit structures that explain every amount.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ComponentType, PayPeriod};

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A non-blocking warning raised during validation or calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a period aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// One adjustment's contribution to a pay period.
///
/// # Example
///
/// ```
/// use adjustment_engine::models::AdjustmentLine;
/// use rust_decimal::Decimal;
///
/// let line = AdjustmentLine {
///     adjustment_id: "ADS-0001".to_string(),
///     salary_component: "Bonus".to_string(),
///     is_recurring: true,
///     overwrite: false,
///     deduct_full_tax_on_selected_payroll_date: false,
///     full_amount: Decimal::new(3100, 0),
///     amount: Decimal::new(1100, 0),
/// };
/// assert!(line.amount < line.full_amount);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentLine {
    /// The adjustment this line comes from.
    pub adjustment_id: String,
    /// The salary component name.
    pub salary_component: String,
    /// Whether the adjustment is recurring (and therefore prorated).
    pub is_recurring: bool,
    /// Replaces the structure-computed amount instead of adding to it.
    pub overwrite: bool,
    /// Passed through from the adjustment.
    pub deduct_full_tax_on_selected_payroll_date: bool,
    /// The adjustment's full amount.
    pub full_amount: Decimal,
    /// The amount attributable to the period, rounded to currency precision.
    pub amount: Decimal,
}

/// Aggregated totals for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentTotals {
    /// Sum of lines added on top of the structure amounts.
    pub additive_total: Decimal,
    /// Sum of lines replacing structure amounts.
    pub overwrite_total: Decimal,
}

/// All adjustments applicable to one employee, period and component type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAdjustments {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the adjustments belong to.
    pub employee_id: String,
    /// Earnings or deductions.
    pub component_type: ComponentType,
    /// The pay period the amounts are attributed to.
    pub pay_period: PayPeriod,
    /// One line per applicable adjustment, in store order.
    pub lines: Vec<AdjustmentLine>,
    /// Aggregated totals.
    pub totals: AdjustmentTotals,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_adjustment_line_serialization() {
        let line = AdjustmentLine {
            adjustment_id: "ADS-0001".to_string(),
            salary_component: "Bonus".to_string(),
            is_recurring: false,
            overwrite: true,
            deduct_full_tax_on_selected_payroll_date: false,
            full_amount: dec("500.00"),
            amount: dec("500.00"),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"adjustment_id\":\"ADS-0001\""));
        assert!(json.contains("\"amount\":\"500.00\""));
        assert!(json.contains("\"overwrite\":true"));
    }

    #[test]
    fn test_period_adjustments_round_trip() {
        let result = PeriodAdjustments {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            employee_id: "EMP-0001".to_string(),
            component_type: ComponentType::Earning,
            pay_period: PayPeriod::new(
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            )
            .unwrap(),
            lines: vec![],
            totals: AdjustmentTotals {
                additive_total: Decimal::ZERO,
                overwrite_total: Decimal::ZERO,
            },
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 12,
            },
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: PeriodAdjustments = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "TAX_COMPONENT_OVERWRITE".to_string(),
            message: "Tax will not be computed from slabs".to_string(),
            severity: "medium".to_string(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"TAX_COMPONENT_OVERWRITE\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }
}
