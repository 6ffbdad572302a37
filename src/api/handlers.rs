//! HTTP request handlers for the cost engine API.
//!
//! This module contains the handler functions for all API endpoints. The
//! handlers validate input, pick the tax schedule in force and delegate to
//! the pure calculation functions.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compose_with_limit, ensure_converged, gross_up_with_limit, round_currency};
use crate::error::EngineError;
use crate::models::{AuditTrace, CalculationResult, validate_amount};

use super::request::{CalculationRequest, GrossUpRequest};
use super::response::{ApiError, ApiErrorResponse, GrossUpResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/gross-up", post(gross_up_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
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

fn effective_date_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Utc::now().date_naive())
}

/// Handler for POST /calculate endpoint.
///
/// Accepts compensation inputs and returns the rounded cost breakdown with
/// its audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let config = state.config();
    let date = effective_date_or_today(request.effective_date);
    let input = request.into_input(config.defaults());

    if let Err(err) = input.validate() {
        return engine_error_response(correlation_id, err);
    }

    let schedule = match config.get_tax_schedule(date) {
        Ok(schedule) => schedule,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let composition =
        compose_with_limit(&input, schedule, state.max_gross_up_iterations());
    let duration = start_time.elapsed();

    if !composition.breakdown.is_reliable() {
        warn!(
            correlation_id = %correlation_id,
            "Returning breakdown from an unconverged gross-up"
        );
    }

    let result = CalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        tax_schedule_version: schedule.version.clone(),
        breakdown: composition.breakdown.rounded(),
        audit_trace: AuditTrace {
            steps: composition.audit_steps,
            warnings: composition.warnings,
            duration_us: duration.as_micros() as u64,
        },
    };

    info!(
        correlation_id = %correlation_id,
        contract_mode = input.contract_mode.as_str(),
        total_monthly_cost = %result.breakdown.total_monthly_cost,
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    json_response(StatusCode::OK, result)
}

/// Handler for POST /gross-up endpoint.
///
/// Solves a guaranteed net salary back to its gross. Responds 422 when the
/// solver cannot reach currency precision.
async fn gross_up_handler(
    State(state): State<AppState>,
    payload: Result<Json<GrossUpRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing gross-up request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    if let Err(err) = validate_amount("net_monthly", request.net_monthly) {
        return engine_error_response(correlation_id, err);
    }

    let date = effective_date_or_today(request.effective_date);
    let schedule = match state.config().get_tax_schedule(date) {
        Ok(schedule) => schedule,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let outcome =
        gross_up_with_limit(request.net_monthly, schedule, state.max_gross_up_iterations());
    let gross = match ensure_converged(request.net_monthly, outcome) {
        Ok(gross) => gross,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    info!(
        correlation_id = %correlation_id,
        net_monthly = %request.net_monthly,
        gross = %gross,
        iterations = outcome.iterations,
        "Gross-up completed successfully"
    );

    json_response(
        StatusCode::OK,
        GrossUpResponse {
            net_monthly: request.net_monthly,
            gross_monthly: round_currency(gross),
            residual: outcome.residual,
            iterations: outcome.iterations,
            converged: outcome.converged,
            tax_schedule_version: schedule.version.clone(),
        },
    )
}
