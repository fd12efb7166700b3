//! Additional Salary Adjustment Engine
//!
//! This crate validates one-off and recurring additional salary adjustments,
//! prorates recurring adjustments over pay periods, resolves which adjustments
//! apply to a payroll run, and drives the submit/cancel side effects on
//! employee advances and referrals.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod interval;
pub mod lifecycle;
pub mod models;
pub mod store;
pub mod validation;
