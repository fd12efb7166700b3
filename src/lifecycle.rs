//! Document lifecycle of an adjustment.
//!
//! A record moves Draft → Submitted → Cancelled. Submitting and cancelling fire
//! hooks on the referenced record: an employee advance has its return amount
//! moved by the adjustment amount, a referral has its bonus payment status
//! flipped. The enabled flag may change on drafts and submitted records.

use tracing::info;

use crate::error::{EngineError, EngineResult, RuleViolation};
use crate::models::{AdjustmentRecord, DocStatus, Reference, ReferralPaymentStatus};
use crate::store::{AdvanceStore, DocumentStore, ReferralStore};
use crate::validation::{ValidationReport, validate_for_write, validate_update_after_submit};

/// Applies the submit side effects of the record's reference.
pub fn on_submit(
    record: &AdjustmentRecord,
    store: &mut (impl AdvanceStore + ReferralStore),
) -> EngineResult<()> {
    match &record.reference {
        Reference::EmployeeAdvance(advance) => {
            store.adjust_return_amount(advance, record.amount)?;
            store.refresh_status(advance)?;
        }
        Reference::EmployeeReferral(referral) => {
            store.set_payment_status(referral, ReferralPaymentStatus::Paid)?;
        }
        Reference::None => {}
    }
    Ok(())
}

/// Reverses the submit side effects of the record's reference.
pub fn on_cancel(
    record: &AdjustmentRecord,
    store: &mut (impl AdvanceStore + ReferralStore),
) -> EngineResult<()> {
    match &record.reference {
        Reference::EmployeeAdvance(advance) => {
            store.adjust_return_amount(advance, -record.amount)?;
            store.refresh_status(advance)?;
        }
        Reference::EmployeeReferral(referral) => {
            store.set_payment_status(referral, ReferralPaymentStatus::Unpaid)?;
        }
        Reference::None => {}
    }
    Ok(())
}

fn invalid_transition(record: &AdjustmentRecord, action: &'static str) -> EngineError {
    RuleViolation::InvalidTransition {
        record: record.id.clone(),
        action,
        status: record.doc_status,
    }
    .into()
}

/// Validates and stores a draft, creating it or replacing an existing draft.
///
/// # Errors
///
/// `InvalidTransition` if a record with the same id exists and is no longer a
/// draft; otherwise the first validation failure.
pub fn save_draft(
    store: &mut impl DocumentStore,
    mut record: AdjustmentRecord,
) -> EngineResult<(AdjustmentRecord, ValidationReport)> {
    match store.get_record(&record.id) {
        Ok(existing) if existing.doc_status != DocStatus::Draft => {
            return Err(invalid_transition(&existing, "save"));
        }
        Ok(_) | Err(EngineError::NotFound { .. }) => {}
        Err(err) => return Err(err),
    }

    record.doc_status = DocStatus::Draft;
    let report = validate_for_write(&mut record, &*store, &*store, &*store)?;
    store.save_record(record.clone())?;

    info!(
        adjustment = %record.id,
        employee = %record.employee,
        component = %record.component_name(),
        "Saved draft adjustment"
    );
    Ok((record, report))
}

/// Re-validates a draft, marks it submitted, and fires the submit hooks.
pub fn submit(
    store: &mut impl DocumentStore,
    id: &str,
) -> EngineResult<(AdjustmentRecord, ValidationReport)> {
    let mut record = store.get_record(id)?;
    if record.doc_status != DocStatus::Draft {
        return Err(invalid_transition(&record, "submit"));
    }

    let report = validate_for_write(&mut record, &*store, &*store, &*store)?;
    on_submit(&record, store)?;
    record.doc_status = DocStatus::Submitted;
    store.save_record(record.clone())?;

    info!(
        adjustment = %record.id,
        employee = %record.employee,
        amount = %record.amount,
        "Submitted adjustment"
    );
    Ok((record, report))
}

/// Cancels a submitted record and reverses its submit hooks.
pub fn cancel(store: &mut impl DocumentStore, id: &str) -> EngineResult<AdjustmentRecord> {
    let mut record = store.get_record(id)?;
    if record.doc_status != DocStatus::Submitted {
        return Err(invalid_transition(&record, "cancel"));
    }

    on_cancel(&record, store)?;
    record.doc_status = DocStatus::Cancelled;
    store.save_record(record.clone())?;

    info!(adjustment = %record.id, employee = %record.employee, "Cancelled adjustment");
    Ok(record)
}

/// Enables or disables a draft or submitted record.
///
/// Re-enabling a submitted recurring record re-checks it for overlaps.
pub fn set_disabled(
    store: &mut impl DocumentStore,
    id: &str,
    disabled: bool,
) -> EngineResult<AdjustmentRecord> {
    let mut record = store.get_record(id)?;
    match record.doc_status {
        DocStatus::Cancelled => return Err(invalid_transition(&record, "update")),
        DocStatus::Submitted => {
            record.disabled = disabled;
            validate_update_after_submit(&record, &*store)?;
        }
        DocStatus::Draft => record.disabled = disabled,
    }
    store.save_record(record.clone())?;

    info!(adjustment = %record.id, disabled = disabled, "Updated adjustment enabled flag");
    Ok(record)
}
