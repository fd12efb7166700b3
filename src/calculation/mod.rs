//! Period calculations for additional salary adjustments.
//!
//! This module selects the adjustments that apply to a pay period, prorates
//! recurring adjustments over the days they share with the period, and builds the
//! per-period summary consumed by payroll.

mod aggregation;
mod period_summary;
mod proration;

pub use aggregation::{is_applicable, select};
pub use period_summary::{round_to_precision, summarize_period};
pub use proration::{ProrationResult, amount_for_period, prorate};
