//! HTTP API module for the Adjustment Engine.
//!
//! This module provides the REST endpoints for saving, submitting, cancelling
//! and disabling adjustments, and for resolving an employee's adjustments for
//! a pay period.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CreateAdjustmentRequest, PeriodAdjustmentsRequest, SetDisabledRequest};
pub use response::{AdjustmentResponse, ApiError, ApiErrorResponse};
pub use state::AppState;
