//! Proration of recurring adjustments.
//!
//! A recurring adjustment spreads its amount evenly over every day of its
//! `[from_date, to_date]` range. The share attributed to a pay period is the daily
//! rate times the number of days the range and the period have in common.

use rust_decimal::Decimal;

use crate::error::{EngineResult, RuleViolation};
use crate::interval;
use crate::models::{AdjustmentRecord, AuditStep, PayPeriod};

/// The result of prorating an adjustment, including the audit step.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// The amount attributable to the period, unrounded.
    pub amount: Decimal,
    /// The amount per day of the adjustment's range, unrounded.
    pub per_day: Decimal,
    /// Days in the adjustment's range.
    pub total_days: i64,
    /// Days the range shares with the period.
    pub applicable_days: i64,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the amount of a recurring adjustment attributable to a pay period.
///
/// No rounding is applied; callers round to currency precision.
///
/// # Errors
///
/// * `MissingDate` if `from_date` or `to_date` is absent.
/// * `DegenerateInterval` if the range ends before it starts.
/// * `NonApplicablePeriod` if the range and the period share no day.
/// * `AmountOverflow` if the prorated amount exceeds the decimal range.
///
/// # Examples
///
/// ```
/// use adjustment_engine::calculation::amount_for_period;
/// use adjustment_engine::models::{AdjustmentRecord, ComponentType, PayPeriod, SalaryComponent};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = AdjustmentRecord::recurring(
///     "ADS-0001",
///     "EMP-0001",
///     SalaryComponent::new("Bonus", ComponentType::Earning),
///     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
///     Decimal::new(3100, 0),
/// );
/// let period = PayPeriod::new(
///     NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(amount_for_period(&record, &period).unwrap(), Decimal::new(1100, 0));
/// ```
pub fn amount_for_period(record: &AdjustmentRecord, period: &PayPeriod) -> EngineResult<Decimal> {
    Ok(prorate(record, period, 1)?.amount)
}

/// Prorates an adjustment over a pay period and records the audit step.
pub fn prorate(
    record: &AdjustmentRecord,
    period: &PayPeriod,
    step_number: u32,
) -> EngineResult<ProrationResult> {
    let from_date = record.from_date.ok_or_else(|| RuleViolation::MissingDate {
        record: record.id.clone(),
        field: "from_date",
    })?;
    let to_date = record.to_date.ok_or_else(|| RuleViolation::MissingDate {
        record: record.id.clone(),
        field: "to_date",
    })?;

    let total_days = interval::inclusive_days(from_date, to_date).map_err(|_| {
        RuleViolation::DegenerateInterval {
            record: record.id.clone(),
            from_date,
            to_date,
        }
    })?;
    let overflow = || RuleViolation::AmountOverflow {
        operation: "proration",
        subject: record.id.clone(),
    };
    let per_day = record
        .amount
        .checked_div(Decimal::from(total_days))
        .ok_or_else(overflow)?;

    let effective_start = period.start_date.max(from_date);
    let effective_end = period.end_date.min(to_date);
    if effective_end < effective_start {
        return Err(RuleViolation::NonApplicablePeriod {
            record: record.id.clone(),
            period_start: period.start_date,
            period_end: period.end_date,
        }
        .into());
    }
    let applicable_days = interval::inclusive_days(effective_start, effective_end)?;
    let amount = per_day
        .checked_mul(Decimal::from(applicable_days))
        .ok_or_else(overflow)?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "recurring_proration".to_string(),
        rule_name: "Recurring Proration".to_string(),
        input: serde_json::json!({
            "adjustment_id": record.id,
            "amount": record.amount.normalize().to_string(),
            "from_date": from_date.to_string(),
            "to_date": to_date.to_string(),
            "period_start": period.start_date.to_string(),
            "period_end": period.end_date.to_string()
        }),
        output: serde_json::json!({
            "total_days": total_days,
            "applicable_days": applicable_days,
            "per_day": per_day.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning: format!(
            "{} / {} days = {} per day x {} days ({} to {}) = {}",
            record.amount.normalize(),
            total_days,
            per_day.normalize(),
            applicable_days,
            effective_start,
            effective_end,
            amount.normalize()
        ),
    };

    Ok(ProrationResult {
        amount,
        per_day,
        total_days,
        applicable_days,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{ComponentType, SalaryComponent};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_recurring(from: NaiveDate, to: NaiveDate, amount: &str) -> AdjustmentRecord {
        AdjustmentRecord::recurring(
            "ADS-0001",
            "EMP-0001",
            SalaryComponent::new("Bonus", ComponentType::Earning),
            from,
            to,
            dec(amount),
        )
    }

    fn period(start: NaiveDate, end: NaiveDate) -> PayPeriod {
        PayPeriod::new(start, end).unwrap()
    }

    fn violation_code(result: EngineResult<ProrationResult>) -> &'static str {
        match result {
            Err(EngineError::Rule(violation)) => violation.code(),
            other => panic!("Expected a rule violation, got {:?}", other),
        }
    }

    /// PR-001: 3100 over January is 100 per day
    #[test]
    fn test_daily_rate_over_full_month() {
        let record = create_recurring(date(2026, 1, 1), date(2026, 1, 31), "3100");
        let result = prorate(&record, &period(date(2026, 1, 1), date(2026, 1, 31)), 1).unwrap();

        assert_eq!(result.per_day, dec("100"));
        assert_eq!(result.total_days, 31);
        assert_eq!(result.applicable_days, 31);
        assert_eq!(result.amount, dec("3100"));
    }

    /// PR-002: 11 days at 100 per day
    #[test]
    fn test_partial_period_inside_range() {
        let record = create_recurring(date(2026, 1, 1), date(2026, 1, 31), "3100");
        let result = prorate(&record, &period(date(2026, 1, 10), date(2026, 1, 20)), 1).unwrap();

        assert_eq!(result.applicable_days, 11);
        assert_eq!(result.amount, dec("1100"));
    }

    /// PR-003: range starting mid-period counts only its own days
    #[test]
    fn test_range_starting_mid_period() {
        let record = create_recurring(date(2026, 1, 16), date(2026, 2, 14), "3000");
        let result = prorate(&record, &period(date(2026, 1, 1), date(2026, 1, 31)), 1).unwrap();

        assert_eq!(result.total_days, 30);
        assert_eq!(result.applicable_days, 16);
        assert_eq!(result.amount, dec("1600"));
    }

    /// PR-004: range ending mid-period is clamped at its end
    #[test]
    fn test_range_ending_mid_period() {
        let record = create_recurring(date(2025, 12, 17), date(2026, 1, 15), "3000");
        let result = prorate(&record, &period(date(2026, 1, 1), date(2026, 1, 31)), 1).unwrap();

        assert_eq!(result.applicable_days, 15);
        assert_eq!(result.amount, dec("1500"));
    }

    /// PR-005: single-day range
    #[test]
    fn test_single_day_range() {
        let record = create_recurring(date(2026, 1, 15), date(2026, 1, 15), "250");
        let result = prorate(&record, &period(date(2026, 1, 1), date(2026, 1, 31)), 1).unwrap();

        assert_eq!(result.total_days, 1);
        assert_eq!(result.amount, dec("250"));
    }

    #[test]
    fn test_uneven_rate_is_not_rounded() {
        let record = create_recurring(date(2026, 1, 1), date(2026, 1, 3), "100");
        let result = prorate(&record, &period(date(2026, 1, 1), date(2026, 1, 1)), 1).unwrap();

        assert_eq!(result.amount.round_dp(2), dec("33.33"));
        assert!(result.amount.scale() > 2);
    }

    #[test]
    fn test_reversed_range_is_degenerate() {
        let record = create_recurring(date(2026, 2, 1), date(2026, 1, 1), "100");
        let result = prorate(&record, &period(date(2026, 1, 1), date(2026, 1, 31)), 1);
        assert_eq!(violation_code(result), "DEGENERATE_INTERVAL");
    }

    #[test]
    fn test_period_outside_range_is_not_applicable() {
        let record = create_recurring(date(2026, 1, 1), date(2026, 1, 31), "3100");
        let result = prorate(&record, &period(date(2026, 2, 1), date(2026, 2, 28)), 1);
        assert_eq!(violation_code(result), "NON_APPLICABLE_PERIOD");
    }

    #[test]
    fn test_missing_range_is_missing_date() {
        let mut record = create_recurring(date(2026, 1, 1), date(2026, 1, 31), "3100");
        record.from_date = None;
        let result = prorate(&record, &period(date(2026, 1, 1), date(2026, 1, 31)), 1);
        assert_eq!(violation_code(result), "MISSING_DATE");
    }

    /// PR-006: MAX / 2 rounds up, so two days of it exceed the decimal range
    #[test]
    fn test_overflowing_proration_is_rejected() {
        let mut record = create_recurring(date(2026, 1, 1), date(2026, 1, 2), "0");
        record.amount = Decimal::MAX;
        let result = prorate(&record, &period(date(2026, 1, 1), date(2026, 1, 2)), 1);
        assert_eq!(violation_code(result), "AMOUNT_OVERFLOW");
    }

    #[test]
    fn test_max_amount_over_single_day_is_exact() {
        let mut record = create_recurring(date(2026, 1, 1), date(2026, 1, 1), "0");
        record.amount = Decimal::MAX;
        let result = prorate(&record, &period(date(2026, 1, 1), date(2026, 1, 31)), 1).unwrap();
        assert_eq!(result.amount, Decimal::MAX);
    }

    #[test]
    fn test_audit_step_records_calculation() {
        let record = create_recurring(date(2026, 1, 1), date(2026, 1, 31), "3100");
        let result = prorate(&record, &period(date(2026, 1, 10), date(2026, 1, 20)), 4).unwrap();

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "recurring_proration");
        assert_eq!(result.audit_step.output["per_day"].as_str().unwrap(), "100");
        assert_eq!(result.audit_step.output["applicable_days"].as_i64().unwrap(), 11);
        assert!(result.audit_step.reasoning.contains("3100 / 31 days"));
        assert!(result.audit_step.reasoning.contains("= 1100"));
    }

    #[test]
    fn test_amount_for_period_matches_prorate() {
        let record = create_recurring(date(2026, 1, 1), date(2026, 1, 31), "3100");
        let amount =
            amount_for_period(&record, &period(date(2026, 1, 10), date(2026, 1, 20))).unwrap();
        assert_eq!(amount, dec("1100"));
    }
}
