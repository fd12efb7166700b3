//! Core data models for the Adjustment Engine.
//!
//! This module contains the adjustment record, its salary component and reference,
//! the master data the rules consult, and the period aggregation result.

mod adjustment;
mod advance;
mod component;
mod employee;
mod pay_period;
mod period_adjustments;
mod referral;

pub use adjustment::{AdjustmentRecord, DocStatus, Reference};
pub use advance::{AdvanceStatus, EmployeeAdvance};
pub use component::{ComponentType, SalaryComponent};
pub use employee::{EmployeeProfile, EmployeeStatus};
pub use pay_period::PayPeriod;
pub use period_adjustments::{
    AdjustmentLine, AdjustmentTotals, AuditStep, AuditTrace, AuditWarning, PeriodAdjustments,
};
pub use referral::{Referral, ReferralPaymentStatus, ReferralStatus};
