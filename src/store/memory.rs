//! In-memory implementation of every store trait.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{EngineError, EngineResult, RuleViolation};
use crate::interval::DateSpan;
use crate::models::{
    AdjustmentRecord, AdvanceStatus, ComponentType, EmployeeAdvance, EmployeeProfile, PayPeriod,
    Referral, ReferralPaymentStatus,
};

use super::{AdvanceStore, EmployeeLookup, RecordStore, RecordWriter, ReferralLookup, ReferralStore};

/// Seed data for an [`InMemoryStore`], as loaded from `master_data.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MasterData {
    /// Employee profiles.
    #[serde(default)]
    pub employees: Vec<EmployeeProfile>,
    /// Employee referrals.
    #[serde(default)]
    pub referrals: Vec<Referral>,
    /// Employee advances.
    #[serde(default)]
    pub advances: Vec<EmployeeAdvance>,
}

/// Holds adjustments and master data in process memory.
///
/// Adjustment records keep their insertion order, which is the "natural order"
/// aggregation scans in.
///
/// # Example
///
/// ```
/// use adjustment_engine::models::{
///     AdjustmentRecord, ComponentType, EmployeeProfile, EmployeeStatus, SalaryComponent,
/// };
/// use adjustment_engine::store::{InMemoryStore, RecordWriter};
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
/// store.save_record(record).unwrap();
/// assert_eq!(store.get_record("ADS-0001").unwrap().amount, Decimal::new(500, 0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<AdjustmentRecord>,
    employees: HashMap<String, EmployeeProfile>,
    referrals: HashMap<String, Referral>,
    advances: HashMap<String, EmployeeAdvance>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with master data and no adjustments.
    pub fn from_master_data(master_data: MasterData) -> Self {
        let mut store = Self::new();
        for employee in master_data.employees {
            store.add_employee(employee);
        }
        for referral in master_data.referrals {
            store.add_referral(referral);
        }
        for advance in master_data.advances {
            store.add_advance(advance);
        }
        store
    }

    /// Adds or replaces an employee profile.
    pub fn add_employee(&mut self, employee: EmployeeProfile) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Adds or replaces a referral.
    pub fn add_referral(&mut self, referral: Referral) {
        self.referrals.insert(referral.id.clone(), referral);
    }

    /// Adds or replaces an employee advance.
    pub fn add_advance(&mut self, advance: EmployeeAdvance) {
        self.advances.insert(advance.id.clone(), advance);
    }

    /// All adjustment records in store order.
    pub fn records(&self) -> &[AdjustmentRecord] {
        &self.records
    }

    /// Looks up an employee advance.
    pub fn advance(&self, id: &str) -> Option<&EmployeeAdvance> {
        self.advances.get(id)
    }

    /// Looks up a referral.
    pub fn referral(&self, id: &str) -> Option<&Referral> {
        self.referrals.get(id)
    }

    fn employee(&self, id: &str) -> EngineResult<&EmployeeProfile> {
        self.employees
            .get(id)
            .ok_or_else(|| EngineError::not_found("Employee", id))
    }

    fn advance_mut(&mut self, id: &str) -> EngineResult<&mut EmployeeAdvance> {
        self.advances
            .get_mut(id)
            .ok_or_else(|| EngineError::not_found("Employee Advance", id))
    }

    /// Effective records of one employee and component, other than `exclude_id`.
    fn effective_for<'a>(
        &'a self,
        employee: &'a str,
        component: &'a str,
        exclude_id: &'a str,
    ) -> impl Iterator<Item = &'a AdjustmentRecord> + 'a {
        self.records.iter().filter(move |r| {
            r.is_effective()
                && r.employee == employee
                && r.component_name() == component
                && r.id != exclude_id
        })
    }
}

impl RecordStore for InMemoryStore {
    fn find_overlapping_recurring(
        &self,
        employee: &str,
        component: &str,
        exclude_id: &str,
        span: DateSpan,
    ) -> EngineResult<Vec<String>> {
        Ok(self
            .effective_for(employee, component, exclude_id)
            .filter(|r| r.is_recurring)
            .filter(|r| r.date_range().is_some_and(|range| range.overlaps(&span)))
            .map(|r| r.id.clone())
            .collect())
    }

    fn find_overwrite_conflict(
        &self,
        employee: &str,
        component: &str,
        exclude_id: &str,
        coverage: DateSpan,
    ) -> EngineResult<Option<String>> {
        Ok(self
            .effective_for(employee, component, exclude_id)
            .filter(|r| r.overwrite_salary_structure_amount)
            .find(|r| r.coverage().is_some_and(|c| c.overlaps(&coverage)))
            .map(|r| r.id.clone()))
    }

    fn query(
        &self,
        employee: &str,
        component_type: ComponentType,
        _period: &PayPeriod,
    ) -> EngineResult<Vec<AdjustmentRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| {
                r.is_effective() && r.employee == employee && r.component_type() == component_type
            })
            .cloned()
            .collect())
    }
}

impl RecordWriter for InMemoryStore {
    fn get_record(&self, id: &str) -> EngineResult<AdjustmentRecord> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("Additional Salary", id))
    }

    fn save_record(&mut self, record: AdjustmentRecord) -> EngineResult<()> {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        Ok(())
    }
}

impl EmployeeLookup for InMemoryStore {
    fn is_active(&self, employee: &str) -> EngineResult<bool> {
        Ok(self.employee(employee)?.is_active())
    }

    fn joining_and_relieving_dates(
        &self,
        employee: &str,
    ) -> EngineResult<(NaiveDate, Option<NaiveDate>)> {
        let profile = self.employee(employee)?;
        Ok((profile.date_of_joining, profile.relieving_date))
    }

    fn has_salary_structure_assignment(&self, employee: &str) -> EngineResult<bool> {
        Ok(self.employee(employee)?.salary_structure_assigned)
    }
}

impl ReferralLookup for InMemoryStore {
    fn get_referral(&self, referral: &str) -> EngineResult<Referral> {
        self.referrals
            .get(referral)
            .cloned()
            .ok_or_else(|| EngineError::not_found("Employee Referral", referral))
    }
}

impl AdvanceStore for InMemoryStore {
    fn adjust_return_amount(&mut self, advance: &str, delta: Decimal) -> EngineResult<Decimal> {
        let record = self.advance_mut(advance)?;
        record.return_amount = record.return_amount.checked_add(delta).ok_or_else(|| {
            RuleViolation::AmountOverflow {
                operation: "advance return amount",
                subject: advance.to_string(),
            }
        })?;
        debug!(
            advance = %advance,
            delta = %delta,
            return_amount = %record.return_amount,
            "Adjusted advance return amount"
        );
        Ok(record.return_amount)
    }

    fn refresh_status(&mut self, advance: &str) -> EngineResult<AdvanceStatus> {
        let record = self.advance_mut(advance)?;
        record.status = record.computed_status();
        Ok(record.status)
    }
}

impl ReferralStore for InMemoryStore {
    fn set_payment_status(
        &mut self,
        referral: &str,
        status: ReferralPaymentStatus,
    ) -> EngineResult<()> {
        let record = self
            .referrals
            .get_mut(referral)
            .ok_or_else(|| EngineError::not_found("Employee Referral", referral))?;
        record.payment_status = status;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DocStatus, EmployeeStatus, SalaryComponent};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bonus() -> SalaryComponent {
        SalaryComponent::new("Bonus", ComponentType::Earning)
    }

    fn submitted(mut record: AdjustmentRecord) -> AdjustmentRecord {
        record.doc_status = DocStatus::Submitted;
        record
    }

    fn create_store() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store.add_employee(EmployeeProfile {
            id: "EMP-0001".to_string(),
            status: EmployeeStatus::Active,
            date_of_joining: date(2024, 1, 1),
            relieving_date: None,
            salary_structure_assigned: true,
        });
        store
    }

    #[test]
    fn test_save_record_replaces_by_id() {
        let mut store = create_store();
        let record = AdjustmentRecord::one_off(
            "ADS-0001",
            "EMP-0001",
            bonus(),
            date(2026, 1, 25),
            Decimal::new(500, 0),
        );
        store.save_record(record.clone()).unwrap();

        let mut updated = record;
        updated.amount = Decimal::new(750, 0);
        store.save_record(updated).unwrap();

        assert_eq!(store.records().len(), 1);
        assert_eq!(
            store.get_record("ADS-0001").unwrap().amount,
            Decimal::new(750, 0)
        );
    }

    #[test]
    fn test_get_missing_record_is_not_found() {
        let store = create_store();
        match store.get_record("ADS-9999") {
            Err(EngineError::NotFound { kind, id }) => {
                assert_eq!(kind, "Additional Salary");
                assert_eq!(id, "ADS-9999");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_find_overlapping_recurring_ignores_drafts_and_disabled() {
        let mut store = create_store();
        let draft = AdjustmentRecord::recurring(
            "ADS-0001",
            "EMP-0001",
            bonus(),
            date(2026, 1, 1),
            date(2026, 1, 31),
            Decimal::new(100, 0),
        );
        let mut disabled = submitted(AdjustmentRecord::recurring(
            "ADS-0002",
            "EMP-0001",
            bonus(),
            date(2026, 1, 1),
            date(2026, 1, 31),
            Decimal::new(100, 0),
        ));
        disabled.disabled = true;
        let active = submitted(AdjustmentRecord::recurring(
            "ADS-0003",
            "EMP-0001",
            bonus(),
            date(2026, 1, 20),
            date(2026, 2, 28),
            Decimal::new(100, 0),
        ));
        store.save_record(draft).unwrap();
        store.save_record(disabled).unwrap();
        store.save_record(active).unwrap();

        let span = DateSpan::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap();
        let ids = store
            .find_overlapping_recurring("EMP-0001", "Bonus", "ADS-NEW", span)
            .unwrap();
        assert_eq!(ids, vec!["ADS-0003".to_string()]);

        let excluded = store
            .find_overlapping_recurring("EMP-0001", "Bonus", "ADS-0003", span)
            .unwrap();
        assert!(excluded.is_empty());
    }

    #[test]
    fn test_find_overwrite_conflict_matches_payroll_date_inside_range() {
        let mut store = create_store();
        let mut ranged = submitted(AdjustmentRecord::recurring(
            "ADS-0001",
            "EMP-0001",
            bonus(),
            date(2026, 1, 1),
            date(2026, 3, 31),
            Decimal::new(100, 0),
        ));
        ranged.overwrite_salary_structure_amount = true;
        store.save_record(ranged).unwrap();

        let conflict = store
            .find_overwrite_conflict(
                "EMP-0001",
                "Bonus",
                "ADS-NEW",
                DateSpan::single(date(2026, 2, 25)),
            )
            .unwrap();
        assert_eq!(conflict, Some("ADS-0001".to_string()));

        let clear = store
            .find_overwrite_conflict(
                "EMP-0001",
                "Bonus",
                "ADS-NEW",
                DateSpan::single(date(2026, 4, 1)),
            )
            .unwrap();
        assert!(clear.is_none());
    }

    #[test]
    fn test_query_filters_employee_type_and_status() {
        let mut store = create_store();
        store
            .save_record(submitted(AdjustmentRecord::one_off(
                "ADS-0001",
                "EMP-0001",
                bonus(),
                date(2026, 1, 25),
                Decimal::new(500, 0),
            )))
            .unwrap();
        store
            .save_record(submitted(AdjustmentRecord::one_off(
                "ADS-0002",
                "EMP-0001",
                SalaryComponent::new("Advance Recovery", ComponentType::Deduction),
                date(2026, 1, 25),
                Decimal::new(200, 0),
            )))
            .unwrap();
        store
            .save_record(AdjustmentRecord::one_off(
                "ADS-0003",
                "EMP-0001",
                bonus(),
                date(2026, 1, 25),
                Decimal::new(500, 0),
            ))
            .unwrap();

        let period = PayPeriod::new(date(2026, 1, 1), date(2026, 1, 31)).unwrap();
        let earnings = store
            .query("EMP-0001", ComponentType::Earning, &period)
            .unwrap();
        assert_eq!(earnings.len(), 1);
        assert_eq!(earnings[0].id, "ADS-0001");
    }

    #[test]
    fn test_missing_employee_is_infrastructure_error() {
        let store = create_store();
        let error = store.is_active("EMP-9999").unwrap_err();
        assert!(!error.is_rule_violation());
    }

    #[test]
    fn test_adjust_return_amount_and_refresh_status() {
        let mut store = create_store();
        store.add_advance(EmployeeAdvance {
            id: "ADV-0001".to_string(),
            employee: "EMP-0001".to_string(),
            advance_amount: Decimal::new(1000, 0),
            paid_amount: Decimal::new(1000, 0),
            claimed_amount: Decimal::ZERO,
            return_amount: Decimal::ZERO,
            status: AdvanceStatus::Paid,
        });

        let amount = store
            .adjust_return_amount("ADV-0001", Decimal::new(1000, 0))
            .unwrap();
        assert_eq!(amount, Decimal::new(1000, 0));
        assert_eq!(
            store.refresh_status("ADV-0001").unwrap(),
            AdvanceStatus::Returned
        );
        assert_eq!(
            store.advance("ADV-0001").unwrap().status,
            AdvanceStatus::Returned
        );
    }

    #[test]
    fn test_adjust_return_amount_overflow_leaves_advance_unchanged() {
        let mut store = create_store();
        store.add_advance(EmployeeAdvance {
            id: "ADV-0001".to_string(),
            employee: "EMP-0001".to_string(),
            advance_amount: Decimal::new(1000, 0),
            paid_amount: Decimal::new(1000, 0),
            claimed_amount: Decimal::ZERO,
            return_amount: Decimal::new(1000, 0),
            status: AdvanceStatus::Returned,
        });

        let err = store
            .adjust_return_amount("ADV-0001", Decimal::MAX)
            .unwrap_err();
        assert_eq!(err.rule().map(RuleViolation::code), Some("AMOUNT_OVERFLOW"));
        assert_eq!(
            store.advance("ADV-0001").unwrap().return_amount,
            Decimal::new(1000, 0)
        );
    }

    #[test]
    fn test_from_master_data() {
        let master_data = MasterData {
            employees: vec![],
            referrals: vec![Referral {
                id: "REF-0001".to_string(),
                applicable_for_bonus: true,
                status: crate::models::ReferralStatus::Accepted,
                payment_status: ReferralPaymentStatus::Unpaid,
            }],
            advances: vec![],
        };
        let mut store = InMemoryStore::from_master_data(master_data);
        store
            .set_payment_status("REF-0001", ReferralPaymentStatus::Paid)
            .unwrap();
        assert_eq!(
            store.referral("REF-0001").unwrap().payment_status,
            ReferralPaymentStatus::Paid
        );
    }
}
