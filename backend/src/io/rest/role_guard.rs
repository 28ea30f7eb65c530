//! Optional server-side role check for the `/api` routes.
//!
//! When enabled, a request must carry a [`ROLE_HEADER`] naming a role that
//! holds one of the route's capabilities. Routes without a listed
//! capability (the log sink, static files) always pass.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::{Capability, Role, ROLE_HEADER};
use tracing::warn;

use super::error::AppError;
use crate::AppState;

const LIST_YOUTH: &[Capability] = &[Capability::ManageYouth, Capability::ViewAttendance];
const CREATE_YOUTH: &[Capability] = &[Capability::ManageYouth];
const LIST_ATTENDANCE: &[Capability] = &[Capability::ViewAttendance];
const RECORD_ATTENDANCE: &[Capability] = &[Capability::RecordAttendance];

/// Capabilities that admit a request; `None` means unguarded
pub fn required_capabilities(method: &str, path: &str) -> Option<&'static [Capability]> {
    match (method, path) {
        ("GET", "/api/youth") => Some(LIST_YOUTH),
        ("POST", "/api/youth") => Some(CREATE_YOUTH),
        ("GET", "/api/attendance") => Some(LIST_ATTENDANCE),
        ("POST", "/api/attendance") => Some(RECORD_ATTENDANCE),
        _ => None,
    }
}

fn role_from_headers(headers: &HeaderMap) -> Option<Role> {
    headers
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

pub async fn role_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.enforce_roles {
        return next.run(request).await;
    }

    let Some(capabilities) = required_capabilities(request.method().as_str(), request.uri().path())
    else {
        return next.run(request).await;
    };

    match role_from_headers(request.headers()) {
        Some(role) if capabilities.iter().any(|capability| role.can(*capability)) => {
            next.run(request).await
        }
        role => {
            warn!(
                "Denied {} {} for role {:?}",
                request.method(),
                request.uri().path(),
                role
            );
            AppError::Forbidden.into_response()
        }
    }
}
