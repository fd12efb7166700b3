//! Request types for the Adjustment Engine API.
//!
//! This module defines the JSON request structures for the adjustment and
//! period endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{AdjustmentRecord, ComponentType, DocStatus, PayPeriod, Reference};

fn default_overwrite() -> bool {
    true
}

/// Request body for `POST /adjustments`.
///
/// The salary component is given by name and resolved against the configured
/// catalog. Overwrite defaults to enabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdjustmentRequest {
    /// Identifier of the draft; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    /// The employee this adjustment pays or deducts.
    pub employee: String,
    /// The salary component name.
    pub salary_component: String,
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
    /// The adjustment amount.
    pub amount: Decimal,
    /// Replace the structure-computed amount instead of adding to it.
    #[serde(default = "default_overwrite")]
    pub overwrite_salary_structure_amount: bool,
    /// Passed through to payroll.
    #[serde(default)]
    pub deduct_full_tax_on_selected_payroll_date: bool,
    /// Create the draft disabled.
    #[serde(default)]
    pub disabled: bool,
    /// The originating record, if any.
    #[serde(default)]
    pub reference: Reference,
}

impl CreateAdjustmentRequest {
    /// Builds a draft record, resolving the component through the catalog.
    pub fn into_record(self, config: &ConfigLoader) -> EngineResult<AdjustmentRecord> {
        let salary_component = config.get_component(&self.salary_component)?;
        let id = self
            .id
            .unwrap_or_else(|| format!("ADS-{}", Uuid::new_v4().simple()));

        Ok(AdjustmentRecord {
            id,
            employee: self.employee,
            salary_component,
            is_recurring: self.is_recurring,
            payroll_date: self.payroll_date,
            from_date: self.from_date,
            to_date: self.to_date,
            amount: self.amount,
            overwrite_salary_structure_amount: self.overwrite_salary_structure_amount,
            deduct_full_tax_on_selected_payroll_date: self.deduct_full_tax_on_selected_payroll_date,
            disabled: self.disabled,
            reference: self.reference,
            doc_status: DocStatus::Draft,
        })
    }
}

/// Request body for `POST /adjustments/:id/disabled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDisabledRequest {
    /// The new value of the disabled flag.
    pub disabled: bool,
}

/// Request body for `POST /period-adjustments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodAdjustmentsRequest {
    /// The employee to resolve adjustments for.
    pub employee: String,
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
    /// Earnings or deductions.
    pub component_type: ComponentType,
}

impl PeriodAdjustmentsRequest {
    /// The requested pay period, failing with `InvalidRange` if it is reversed.
    pub fn pay_period(&self) -> EngineResult<PayPeriod> {
        PayPeriod::new(self.start_date, self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn config() -> ConfigLoader {
        ConfigLoader::load("./config/default").unwrap()
    }

    #[test]
    fn test_deserialize_minimal_create_request() {
        let json = r#"{
            "employee": "EMP-0001",
            "salary_component": "Performance Bonus",
            "payroll_date": "2026-01-25",
            "amount": "500.00"
        }"#;

        let request: CreateAdjustmentRequest = serde_json::from_str(json).unwrap();
        assert!(request.id.is_none());
        assert!(!request.is_recurring);
        assert!(request.overwrite_salary_structure_amount);
        assert_eq!(request.reference, Reference::None);
    }

    #[test]
    fn test_into_record_resolves_component() {
        let json = r#"{
            "id": "ADS-0001",
            "employee": "EMP-0001",
            "salary_component": "Income Tax",
            "payroll_date": "2026-01-25",
            "amount": "200"
        }"#;
        let request: CreateAdjustmentRequest = serde_json::from_str(json).unwrap();

        let record = request.into_record(&config()).unwrap();
        assert_eq!(record.id, "ADS-0001");
        assert_eq!(record.component_type(), ComponentType::Deduction);
        assert!(record.salary_component.variable_based_on_taxable_salary);
        assert_eq!(record.doc_status, DocStatus::Draft);
    }

    #[test]
    fn test_into_record_generates_id() {
        let json = r#"{
            "employee": "EMP-0001",
            "salary_component": "Arrear",
            "payroll_date": "2026-01-25",
            "amount": "200"
        }"#;
        let request: CreateAdjustmentRequest = serde_json::from_str(json).unwrap();

        let record = request.into_record(&config()).unwrap();
        assert!(record.id.starts_with("ADS-"));
    }

    #[test]
    fn test_into_record_unknown_component() {
        let json = r#"{
            "employee": "EMP-0001",
            "salary_component": "Mystery",
            "payroll_date": "2026-01-25",
            "amount": "200"
        }"#;
        let request: CreateAdjustmentRequest = serde_json::from_str(json).unwrap();

        assert!(matches!(
            request.into_record(&config()),
            Err(EngineError::ComponentNotFound { .. })
        ));
    }

    #[test]
    fn test_reference_in_request() {
        let json = r#"{
            "employee": "EMP-0001",
            "salary_component": "Advance Recovery",
            "payroll_date": "2026-01-31",
            "amount": "1000",
            "reference": {"doctype": "employee_advance", "name": "ADV-0001"}
        }"#;
        let request: CreateAdjustmentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.reference,
            Reference::EmployeeAdvance("ADV-0001".to_string())
        );
    }

    #[test]
    fn test_period_request_rejects_reversed_period() {
        let request = PeriodAdjustmentsRequest {
            employee: "EMP-0001".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            component_type: ComponentType::Earning,
        };
        assert!(request.pay_period().is_err());
    }
}
