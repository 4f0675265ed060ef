//! HTTP request handlers for the punch clock API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{build_balance_report, validate_punch_sequence};
use crate::models::{Punch, Schedule};

use super::request::{BalanceRequest, PunchRangeQuery, RecordPunchRequest, SummaryQuery};
use super::response::{ApiError, ApiErrorResponse, RecordPunchResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/balance", post(balance_handler))
        .route(
            "/punches",
            get(list_punches_handler)
                .post(record_punch_handler)
                .delete(clear_punches_handler),
        )
        .route(
            "/schedule",
            get(get_schedule_handler)
                .put(put_schedule_handler)
                .delete(clear_schedule_handler),
        )
        .route("/summary", get(summary_handler))
        .with_state(state)
}

/// Maps a JSON body rejection to an API error.
///
/// Missing fields are reported as `VALIDATION_ERROR`; anything else that
/// fails to parse is `MALFORMED_JSON`.
fn json_rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
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

    ApiErrorResponse::bad_request(error)
}

/// Maps a query string rejection to an API error.
fn query_rejection_error(rejection: QueryRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let body_text = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Query string error"
    );
    ApiErrorResponse::bad_request(ApiError::validation_error(body_text))
}

/// Rejects a date range whose start falls after its end.
fn check_range(range: &PunchRangeQuery, correlation_id: Uuid) -> Result<(), ApiErrorResponse> {
    if range.is_valid() {
        return Ok(());
    }

    warn!(
        correlation_id = %correlation_id,
        from = ?range.from,
        to = ?range.to,
        "Invalid date range"
    );
    Err(ApiErrorResponse::bad_request(ApiError::validation_error(
        "'from' must not be after 'to'",
    )))
}

/// Handler for POST /balance endpoint.
///
/// Computes a balance report from the schedule and punches in the request
/// body without touching the stores.
async fn balance_handler(payload: Result<Json<BalanceRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing balance request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_error(rejection, correlation_id).into_response(),
    };

    if request.strict {
        if let Err(err) = validate_punch_sequence(&request.punches) {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Punch sequence rejected"
            );
            return ApiErrorResponse::from(err).into_response();
        }
    }

    let report = build_balance_report(
        request.schedule.as_ref(),
        &request.punches,
        request.reference_date,
    );

    info!(
        correlation_id = %correlation_id,
        calculation_id = %report.calculation_id,
        punches_count = request.punches.len(),
        aggregate_balance = %report.summary.aggregate_balance,
        warnings = report.audit_trace.warnings.len(),
        duration_us = report.audit_trace.duration_us,
        "Balance report completed"
    );

    (StatusCode::OK, Json(report)).into_response()
}

/// Handler for GET /punches endpoint.
async fn list_punches_handler(
    State(state): State<AppState>,
    query: Result<Query<PunchRangeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Listing punches");

    let range = match query {
        Ok(Query(range)) => range,
        Err(rejection) => return query_rejection_error(rejection, correlation_id).into_response(),
    };
    if let Err(err) = check_range(&range, correlation_id) {
        return err.into_response();
    }

    let entries = state.punches().read().await.between(range.from, range.to);
    info!(
        correlation_id = %correlation_id,
        punches_count = entries.len(),
        "Punches listed"
    );

    (StatusCode::OK, Json(entries)).into_response()
}

/// Handler for POST /punches endpoint.
async fn record_punch_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecordPunchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Recording punch");

    let punch: Punch = match payload {
        Ok(Json(req)) => req.into(),
        Err(rejection) => return json_rejection_error(rejection, correlation_id).into_response(),
    };

    let timestamp = punch.timestamp;
    let id = state.punches().write().await.record(punch);
    info!(
        correlation_id = %correlation_id,
        punch_id = id,
        timestamp = %timestamp,
        "Punch recorded"
    );

    (StatusCode::CREATED, Json(RecordPunchResponse { id })).into_response()
}

/// Handler for DELETE /punches endpoint.
async fn clear_punches_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    state.punches().write().await.clear();
    info!(correlation_id = %correlation_id, "Punches cleared");

    StatusCode::NO_CONTENT.into_response()
}

/// Handler for GET /schedule endpoint.
async fn get_schedule_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Fetching schedule");

    match state.schedule_snapshot().await {
        Some(schedule) => (StatusCode::OK, Json(schedule)).into_response(),
        None => {
            warn!(correlation_id = %correlation_id, "Schedule not configured");
            ApiErrorResponse::not_found(ApiError::schedule_not_configured()).into_response()
        }
    }
}

/// Handler for PUT /schedule endpoint.
async fn put_schedule_handler(
    State(state): State<AppState>,
    payload: Result<Json<Schedule>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Updating schedule");

    let schedule = match payload {
        Ok(Json(schedule)) => schedule,
        Err(rejection) => return json_rejection_error(rejection, correlation_id).into_response(),
    };

    state.schedule().write().await.set(schedule.clone());
    info!(
        correlation_id = %correlation_id,
        active_weekdays = %schedule.active_weekdays,
        "Schedule updated"
    );

    (StatusCode::OK, Json(schedule)).into_response()
}

/// Handler for DELETE /schedule endpoint.
async fn clear_schedule_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    state.schedule().write().await.clear();
    info!(correlation_id = %correlation_id, "Schedule cleared");

    StatusCode::NO_CONTENT.into_response()
}

/// Handler for GET /summary endpoint.
///
/// Builds a balance report from the stored schedule and punches. The
/// reference date defaults to today's local date.
async fn summary_handler(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return query_rejection_error(rejection, correlation_id).into_response(),
    };
    let range = query.range();
    if let Err(err) = check_range(&range, correlation_id) {
        return err.into_response();
    }

    let reference_date = query
        .reference_date
        .unwrap_or_else(|| Local::now().date_naive());

    // Snapshots are taken so the computation runs without holding a lock
    let schedule = state.schedule_snapshot().await;
    let punches = state.punches_snapshot(range.from, range.to).await;

    let report = build_balance_report(schedule.as_ref(), &punches, reference_date);
    info!(
        correlation_id = %correlation_id,
        calculation_id = %report.calculation_id,
        reference_date = %reference_date,
        punches_count = punches.len(),
        aggregate_balance = %report.summary.aggregate_balance,
        duration_us = report.audit_trace.duration_us,
        "Summary completed"
    );

    (StatusCode::OK, Json(report)).into_response()
}
