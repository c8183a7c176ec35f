//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{ErrorResponse, HealthResponse, ListQuery, SubmitResponse, SummaryResponse},
};
use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use intake_core::{IntakeError, Recorder, ResponseStore, Submission, TimeRange, render_csv};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// SUBMIT HANDLER
// =============================================================================

/// Record a survey submission.
///
/// Validation failures return 400 with the rejection reason and leave the
/// store untouched. On success the derived group is echoed back.
pub async fn submit_handler(
    State(state): State<AppState>,
    Json(submission): Json<Submission>,
) -> impl IntoResponse {
    // Get write lock and record
    let mut store = state.store.write().await;
    match Recorder::record(&mut *store, &submission) {
        Ok(record) => (
            StatusCode::OK,
            Json(SubmitResponse::success(record.assigned_group)),
        ),
        Err(IntakeError::InvalidSubmission(reason)) => {
            (StatusCode::BAD_REQUEST, Json(SubmitResponse::error(reason)))
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SubmitResponse::error(format!("Store failed: {}", e))),
        ),
    }
}

// =============================================================================
// LIST HANDLER
// =============================================================================

/// List stored responses, newest first, optionally bounded to a time window.
///
/// Malformed `start` / `end` values are treated as absent rather than
/// errors, so a bad filter widens the window instead of failing the request.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Response {
    let range = TimeRange::from_bounds(params.start.as_deref(), params.end.as_deref());

    let store = state.store.read().await;
    match store.list(&range) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => storage_error(e).into_response(),
    }
}

// =============================================================================
// EXPORT HANDLER
// =============================================================================

/// Download every stored response as CSV.
///
/// Same column order the flat-file backend writes, so a download is
/// interchangeable with a copy of the store file.
pub async fn export_handler(State(state): State<AppState>) -> Response {
    let store = state.store.read().await;
    let records = match store.list(&TimeRange::all()) {
        Ok(records) => records,
        Err(e) => return storage_error(e).into_response(),
    };

    match render_csv(&records) {
        Ok(csv_text) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"survey_responses.csv\"",
                ),
            ],
            csv_text,
        )
            .into_response(),
        Err(e) => storage_error(e).into_response(),
    }
}

// =============================================================================
// SUMMARY HANDLER
// =============================================================================

/// Aggregate counts per assigned group.
///
/// Stored labels outside the known set land in the `other` bucket, so the
/// total always equals the sum of the buckets.
pub async fn summary_handler(State(state): State<AppState>) -> Response {
    let store = state.store.read().await;
    match store.tally() {
        Ok(tally) => (StatusCode::OK, Json(SummaryResponse::from(tally))).into_response(),
        Err(e) => storage_error(e).into_response(),
    }
}

// =============================================================================
// SHARED ERROR MAPPING
// =============================================================================

/// Map a storage failure to a 500 response.
fn storage_error(e: IntakeError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format!("Store failed: {}", e))),
    )
}
