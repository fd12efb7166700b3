//! HTTP request handlers for the Adjustment Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::summarize_period;
use crate::error::EngineError;
use crate::lifecycle;
use crate::store::RecordWriter;

use super::request::{CreateAdjustmentRequest, PeriodAdjustmentsRequest, SetDisabledRequest};
use super::response::{AdjustmentResponse, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/adjustments", post(create_adjustment_handler))
        .route("/adjustments/:id", get(get_adjustment_handler))
        .route("/adjustments/:id/submit", post(submit_adjustment_handler))
        .route("/adjustments/:id/cancel", post(cancel_adjustment_handler))
        .route("/adjustments/:id/disabled", post(set_disabled_handler))
        .route("/period-adjustments", post(period_adjustments_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    if err.is_rule_violation() {
        warn!(correlation_id = %correlation_id, error = %err, "Request rejected by rule");
    } else {
        warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    }
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON body rejection to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /adjustments.
///
/// Validates the adjustment and stores it as a draft.
async fn create_adjustment_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateAdjustmentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create adjustment request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let record = match request.into_record(state.config()) {
        Ok(record) => record,
        Err(err) => return error_response(correlation_id, err),
    };

    let mut store = state.store().write().await;
    match lifecycle::save_draft(&mut *store, record) {
        Ok((record, report)) => {
            info!(
                correlation_id = %correlation_id,
                adjustment = %record.id,
                employee = %record.employee,
                warnings = report.warnings.len(),
                "Draft adjustment saved"
            );
            json_response(
                StatusCode::CREATED,
                AdjustmentResponse {
                    record,
                    warnings: report.warnings,
                },
            )
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /adjustments/:id.
async fn get_adjustment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let store = state.store().read().await;
    match store.get_record(&id) {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /adjustments/:id/submit.
async fn submit_adjustment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, adjustment = %id, "Processing submit request");

    let mut store = state.store().write().await;
    match lifecycle::submit(&mut *store, &id) {
        Ok((record, report)) => json_response(
            StatusCode::OK,
            AdjustmentResponse {
                record,
                warnings: report.warnings,
            },
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /adjustments/:id/cancel.
async fn cancel_adjustment_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, adjustment = %id, "Processing cancel request");

    let mut store = state.store().write().await;
    match lifecycle::cancel(&mut *store, &id) {
        Ok(record) => json_response(
            StatusCode::OK,
            AdjustmentResponse {
                record,
                warnings: Vec::new(),
            },
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /adjustments/:id/disabled.
async fn set_disabled_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<SetDisabledRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, adjustment = %id, "Processing enabled flag update");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let mut store = state.store().write().await;
    match lifecycle::set_disabled(&mut *store, &id, request.disabled) {
        Ok(record) => json_response(
            StatusCode::OK,
            AdjustmentResponse {
                record,
                warnings: Vec::new(),
            },
        ),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /period-adjustments.
///
/// Returns every adjustment applicable to the employee and period with its
/// period amount.
async fn period_adjustments_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodAdjustmentsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing period adjustments request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let period = match request.pay_period() {
        Ok(period) => period,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let store = state.store().read().await;
    match summarize_period(
        &*store,
        &request.employee,
        &period,
        request.component_type,
        state.config().currency_precision(),
    ) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee,
                lines = result.lines.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Period adjustments completed successfully"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    async fn read_error(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/adjustments")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());

        let body = r#"{"salary_component": "Arrear", "amount": "100"}"#;
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/adjustments")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = read_error(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("employee"));
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/period-adjustments")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_get_unknown_adjustment_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/adjustments/ADS-9999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_error(response).await.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_component_returns_400() {
        let router = create_router(create_test_state());

        let body = r#"{
            "employee": "EMP-0001",
            "salary_component": "Mystery",
            "payroll_date": "2026-01-25",
            "amount": "100"
        }"#;
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/adjustments")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_error(response).await.code, "COMPONENT_NOT_FOUND");
    }
}
