//! # REST API for Youth Records

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{CreateYouthRequest, REQUIRED_FIELDS_MESSAGE};
use tracing::{error, info, warn};

use super::error::AppError;
use crate::domain::CreateYouthError;
use crate::AppState;

/// List all youth
pub async fn list_youth(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/youth");

    match state.youth_service.list_youth().await {
        Ok(youths) => (StatusCode::OK, Json(youths)).into_response(),
        Err(e) => {
            error!("Failed to list youth: {:?}", e);
            AppError::ServerError("Failed to retrieve youth records".to_string()).into_response()
        }
    }
}

/// Create a youth; any client-supplied id is ignored
pub async fn create_youth(
    State(state): State<AppState>,
    payload: Result<Json<CreateYouthRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("POST /api/youth - unreadable body: {}", rejection);
            return AppError::BadRequest(REQUIRED_FIELDS_MESSAGE.to_string()).into_response();
        }
    };
    info!("POST /api/youth - request: {:?}", request);

    match state.youth_service.create_youth(request).await {
        Ok(youth) => (StatusCode::CREATED, Json(youth)).into_response(),
        Err(CreateYouthError::Storage(e)) => {
            error!("Failed to create youth: {:?}", e);
            AppError::ServerError("Failed to create youth".to_string()).into_response()
        }
        Err(e) => AppError::BadRequest(e.to_string()).into_response(),
    }
}
