//! # REST API for Attendance
//!
//! Bulk recording and the expanded attendance listing.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::Value;
use tracing::{error, info, warn};

use super::error::AppError;
use crate::domain::RecordAttendanceError;
use crate::AppState;

const INVALID_FORMAT: &str = "Invalid attendance data format";

/// Record a batch of attendance
pub async fn record_attendance(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> impl IntoResponse {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!("POST /api/attendance - unreadable body: {}", rejection);
            return AppError::BadRequest(INVALID_FORMAT.to_string()).into_response();
        }
    };
    info!(
        "POST /api/attendance - {} records",
        payload.as_array().map(Vec::len).unwrap_or(0)
    );

    match state.attendance_service.record_attendance(payload).await {
        Ok(records) => (StatusCode::CREATED, Json(records)).into_response(),
        Err(RecordAttendanceError::NotAnArray) => {
            AppError::BadRequest(INVALID_FORMAT.to_string()).into_response()
        }
        Err(e) => {
            error!("Failed to record attendance: {:?}", e);
            AppError::ServerError("Failed to save attendance data".to_string()).into_response()
        }
    }
}

/// List all attendance with youth expanded
pub async fn list_attendance(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/attendance");

    match state.attendance_service.list_attendance().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            error!("Failed to list attendance: {:?}", e);
            AppError::ServerError("Failed to retrieve attendance records".to_string())
                .into_response()
        }
    }
}
