use axum::response::Json;
use shared::{LogRequest, LogResponse};
use tracing::{debug, error, info, warn};

/// Re-emit a frontend log line through the server's subscriber
pub async fn log_message(Json(request): Json<LogRequest>) -> Json<LogResponse> {
    let component = request.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, request.message);

    match request.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message),
    }

    Json(LogResponse { success: true })
}
