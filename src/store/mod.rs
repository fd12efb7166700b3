//! Collaborator interfaces the engine reads from and writes to.
//!
//! The validation, aggregation and lifecycle code never talks to a database
//! directly; it is handed implementations of these traits. [`InMemoryStore`]
//! implements all of them and backs the HTTP service and the tests.
//!
//! Every method returns [`EngineResult`]: a failure to answer is reported as an
//! infrastructure error (`Lookup` or `NotFound`), never as a rule violation.

mod memory;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::interval::DateSpan;
use crate::models::{
    AdjustmentRecord, AdvanceStatus, ComponentType, PayPeriod, Referral, ReferralPaymentStatus,
};

pub use memory::{InMemoryStore, MasterData};

/// Read access to stored adjustment records.
pub trait RecordStore {
    /// Identifiers of submitted, enabled, recurring records for the employee and
    /// component whose range overlaps `span`, excluding `exclude_id`.
    fn find_overlapping_recurring(
        &self,
        employee: &str,
        component: &str,
        exclude_id: &str,
        span: DateSpan,
    ) -> EngineResult<Vec<String>>;

    /// The first submitted, enabled, overwrite-enabled record for the employee and
    /// component whose coverage overlaps `coverage`, excluding `exclude_id`.
    fn find_overwrite_conflict(
        &self,
        employee: &str,
        component: &str,
        exclude_id: &str,
        coverage: DateSpan,
    ) -> EngineResult<Option<String>>;

    /// Submitted, enabled records of the employee for the component type, in
    /// store order. Implementations may pre-filter by `period`; callers re-apply
    /// the full applicability predicate.
    fn query(
        &self,
        employee: &str,
        component_type: ComponentType,
        period: &PayPeriod,
    ) -> EngineResult<Vec<AdjustmentRecord>>;
}

/// Persistence of adjustment records.
pub trait RecordWriter {
    /// Loads a record by identifier.
    fn get_record(&self, id: &str) -> EngineResult<AdjustmentRecord>;

    /// Inserts the record, or replaces the stored record with the same identifier.
    fn save_record(&mut self, record: AdjustmentRecord) -> EngineResult<()>;
}

/// Employee master data.
pub trait EmployeeLookup {
    /// Whether the employee may receive adjustments.
    fn is_active(&self, employee: &str) -> EngineResult<bool>;

    /// The employee's joining date and optional relieving date.
    fn joining_and_relieving_dates(
        &self,
        employee: &str,
    ) -> EngineResult<(NaiveDate, Option<NaiveDate>)>;

    /// Whether at least one salary structure is assigned to the employee.
    fn has_salary_structure_assignment(&self, employee: &str) -> EngineResult<bool>;
}

/// Read access to employee referrals.
pub trait ReferralLookup {
    /// Loads a referral by identifier.
    fn get_referral(&self, referral: &str) -> EngineResult<Referral>;
}

/// Write access to employee advances.
pub trait AdvanceStore {
    /// Adds `delta` to the advance's return amount and returns the new amount.
    fn adjust_return_amount(&mut self, advance: &str, delta: Decimal) -> EngineResult<Decimal>;

    /// Recomputes and stores the advance's status.
    fn refresh_status(&mut self, advance: &str) -> EngineResult<AdvanceStatus>;
}

/// Write access to employee referrals.
pub trait ReferralStore {
    /// Sets the referral's bonus payment status.
    fn set_payment_status(
        &mut self,
        referral: &str,
        status: ReferralPaymentStatus,
    ) -> EngineResult<()>;
}

/// Everything a document transition needs: reads for validation, the record
/// writer, and the stores the lifecycle hooks update.
pub trait DocumentStore:
    RecordStore + RecordWriter + EmployeeLookup + ReferralLookup + AdvanceStore + ReferralStore
{
}

impl<T> DocumentStore for T where
    T: RecordStore + RecordWriter + EmployeeLookup + ReferralLookup + AdvanceStore + ReferralStore
{
}
