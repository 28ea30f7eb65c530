//! # REST API Interface Layer
//!
//! HTTP endpoints for youth records, attendance and the frontend log sink.
//! Handlers translate domain results into status codes and collapse every
//! failure into a fixed `{"message": ...}` body.

pub mod attendance_apis;
pub mod error;
pub mod logging_apis;
pub mod role_guard;
pub mod youth_apis;

pub use attendance_apis::{list_attendance, record_attendance};
pub use error::AppError;
pub use logging_apis::log_message;
pub use role_guard::role_guard;
pub use youth_apis::{create_youth, list_youth};
