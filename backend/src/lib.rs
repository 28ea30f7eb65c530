//! # NetCompassion Backend
//!
//! HTTP server for youth records and attendance.
//!
//! ## Architecture
//!
//! ```text
//! UI Layer (Yew frontend)
//!     ↓
//! IO Layer (REST handlers, role guard)
//!     ↓
//! Domain Layer (youth and attendance services)
//!     ↓
//! Storage Layer (SQLite via sqlx)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::domain::{AttendanceService, YouthService};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub youth_service: YouthService,
    pub attendance_service: AttendanceService,
    pub enforce_roles: bool,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &Config) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = Arc::new(DbConnection::new(&config.database_url).await?);

    info!("Setting up domain model");
    let youth_service = YouthService::new(db_conn.clone());
    let attendance_service = AttendanceService::new(db_conn);

    if config.enforce_roles {
        info!("Role enforcement enabled on /api routes");
    }

    Ok(AppState {
        youth_service,
        attendance_service,
        enforce_roles: config.enforce_roles,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &Config) -> Result<Router> {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/youth", get(io::list_youth).post(io::create_youth))
        .route(
            "/attendance",
            get(io::list_attendance).post(io::record_attendance),
        )
        .route("/logs", post(io::log_message));

    Ok(Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            io::role_guard,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::FailingStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use shared::ROLE_HEADER;
    use tower::ServiceExt;

    fn test_config(enforce_roles: bool) -> Config {
        Config {
            static_dir: "missing-static-dir".to_string(),
            enforce_roles,
            ..Config::default()
        }
    }

    async fn setup_test_app(enforce_roles: bool) -> Router {
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        let state = AppState {
            youth_service: YouthService::new(db.clone()),
            attendance_service: AttendanceService::new(db),
            enforce_roles,
        };
        create_router(state, &test_config(enforce_roles)).expect("Failed to build router")
    }

    fn failing_app() -> Router {
        let store = Arc::new(FailingStore);
        let state = AppState {
            youth_service: YouthService::new(store.clone()),
            attendance_service: AttendanceService::new(store),
            enforce_roles: false,
        };
        create_router(state, &test_config(false)).expect("Failed to build router")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_request(uri: &str, body: &str, role: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(role) = role {
            builder = builder.header(ROLE_HEADER, role);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn youth_body() -> String {
        json!({
            "userID": "staff::1",
            "firstName": "Anna",
            "lastName": "Lee",
            "birthday": "2020-06-15",
            "address": "12 Hill Road",
            "educationLevel": "Nursery"
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_create_and_list_youth() {
        let app = setup_test_app(false).await;

        let (status, created) = send(&app, post_request("/api/youth", &youth_body(), None)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(created["_id"].as_str().unwrap().starts_with("youth::"));
        assert_eq!(created["firstName"], "Anna");
        assert_eq!(created["userID"], "staff::1");

        let (status, listed) = send(&app, get_request("/api/youth")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, json!([created]));
    }

    #[tokio::test]
    async fn test_create_youth_with_blank_field_is_rejected() {
        let app = setup_test_app(false).await;
        let body = json!({ "firstName": "Anna", "lastName": " " }).to_string();

        let (status, error) = send(&app, post_request("/api/youth", &body, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, json!({ "message": "All fields are required." }));

        let (_, listed) = send(&app, get_request("/api/youth")).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_create_youth_with_invalid_birthday_is_rejected() {
        let app = setup_test_app(false).await;
        let body = youth_body().replace("2020-06-15", "someday");

        let (status, error) = send(&app, post_request("/api/youth", &body, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Birthday must be a valid date (YYYY-MM-DD)");
    }

    #[tokio::test]
    async fn test_record_attendance_returns_fresh_ids() {
        let app = setup_test_app(false).await;
        let body = json!([
            { "_id": "a", "youthId": "youth::1", "status": "present", "date": "2024-03-01" },
            { "_id": "b", "youthId": "youth::2", "status": "absent", "date": "2024-03-01" },
            { "youthId": "youth::3", "status": "saved", "date": "2024-03-01" }
        ])
        .to_string();

        let (status, stored) = send(&app, post_request("/api/attendance", &body, None)).await;
        assert_eq!(status, StatusCode::CREATED);

        let stored = stored.as_array().unwrap();
        assert_eq!(stored.len(), 3);
        for record in stored {
            let id = record["_id"].as_str().unwrap();
            assert!(id.starts_with("attendance::"));
            assert!(id != "a" && id != "b");
        }
        assert_eq!(stored[1]["youthId"], "youth::2");
        assert_eq!(stored[2]["status"], "saved");
    }

    #[tokio::test]
    async fn test_record_attendance_non_array_is_bad_request() {
        let app = setup_test_app(false).await;
        let body = json!({ "youthId": "youth::1", "status": "present", "date": "2024-03-01" }).to_string();

        let (status, error) = send(&app, post_request("/api/attendance", &body, None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, json!({ "message": "Invalid attendance data format" }));

        let (status, error) = send(&app, post_request("/api/attendance", "not json", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["message"], "Invalid attendance data format");

        let (_, listed) = send(&app, get_request("/api/attendance")).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_record_attendance_with_malformed_element_stores_nothing() {
        let app = setup_test_app(false).await;
        let body = json!([
            { "youthId": "youth::1", "status": "present", "date": "2024-03-01" },
            { "youthId": "youth::2", "status": "late", "date": "2024-03-01" }
        ])
        .to_string();

        let (status, error) = send(&app, post_request("/api/attendance", &body, None)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error, json!({ "message": "Failed to save attendance data" }));

        let (_, listed) = send(&app, get_request("/api/attendance")).await;
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn test_list_attendance_expands_known_youth_only() {
        let app = setup_test_app(false).await;
        let (_, youth) = send(&app, post_request("/api/youth", &youth_body(), None)).await;
        let youth_id = youth["_id"].as_str().unwrap().to_string();

        let body = json!([
            { "youthId": youth_id, "status": "present", "date": "2024-03-01" },
            { "youthId": "youth::gone", "status": "absent", "date": "2024-03-01" }
        ])
        .to_string();
        let (status, _) = send(&app, post_request("/api/attendance", &body, None)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, listed) = send(&app, get_request("/api/attendance")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed[0]["youthId"], youth);
        assert_eq!(listed[0]["youthId"]["firstName"], "Anna");
        assert_eq!(listed[1]["youthId"], "youth::gone");
    }

    #[tokio::test]
    async fn test_empty_attendance_batch() {
        let app = setup_test_app(false).await;
        let (status, stored) = send(&app, post_request("/api/attendance", "[]", None)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(stored, json!([]));
    }

    #[tokio::test]
    async fn test_role_guard_when_enforced() {
        let app = setup_test_app(true).await;
        let body = json!([{ "youthId": "youth::1", "status": "present", "date": "2024-03-01" }]).to_string();

        let (status, error) = send(&app, post_request("/api/attendance", &body, Some("teacher"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(error, json!({ "message": "Forbidden" }));

        let (status, _) = send(&app, post_request("/api/attendance", &body, None)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, post_request("/api/attendance", &body, Some("pcd"))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, post_request("/api/youth", &youth_body(), Some("teacher"))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(&app, post_request("/api/youth", &youth_body(), Some("auditor"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_role_guard_off_by_default() {
        let app = setup_test_app(false).await;
        let body = json!([{ "youthId": "youth::1", "status": "present", "date": "2024-03-01" }]).to_string();

        let (status, _) = send(&app, post_request("/api/attendance", &body, Some("teacher"))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_log_sink_is_never_guarded() {
        let app = setup_test_app(true).await;
        let body = json!({ "level": "warn", "message": "slow fetch", "component": "attendance" }).to_string();

        let (status, response) = send(&app, post_request("/api/logs", &body, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({ "success": true }));
    }

    #[tokio::test]
    async fn test_store_failures_are_server_errors() {
        let app = failing_app();

        let (status, error) = send(&app, get_request("/api/youth")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error["message"], "Failed to retrieve youth records");

        let (status, error) = send(&app, post_request("/api/youth", &youth_body(), None)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error["message"], "Failed to create youth");

        let (status, error) = send(&app, get_request("/api/attendance")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error["message"], "Failed to retrieve attendance records");

        let body = json!([{ "youthId": "youth::1", "status": "present", "date": "2024-03-01" }]).to_string();
        let (status, error) = send(&app, post_request("/api/attendance", &body, None)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error["message"], "Failed to save attendance data");
    }
}
