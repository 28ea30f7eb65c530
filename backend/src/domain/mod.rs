//! # Domain Layer
//!
//! Services holding the youth and attendance rules. They see the record
//! store only through the storage traits.

pub mod attendance_service;
pub mod youth_service;

pub use attendance_service::{AttendanceService, RecordAttendanceError};
pub use youth_service::{CreateYouthError, YouthService};
