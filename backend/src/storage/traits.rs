//! # Storage Traits
//!
//! Storage abstraction used by the domain services, so the SQLite store can
//! be swapped for a test double.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Attendance, AttendanceRecord, Youth};

#[async_trait]
pub trait YouthStorage: Send + Sync {
    /// Store a new youth record
    async fn store_youth(&self, youth: &Youth) -> Result<()>;

    /// List every youth in insertion order
    async fn list_youth(&self) -> Result<Vec<Youth>>;
}

#[async_trait]
pub trait AttendanceStorage: Send + Sync {
    /// Store a batch of attendance records. Either every record is stored
    /// or none is.
    async fn store_attendance_batch(&self, records: &[Attendance]) -> Result<()>;

    /// List every attendance record with its youth reference expanded where
    /// it resolves
    async fn list_attendance_expanded(&self) -> Result<Vec<AttendanceRecord>>;
}
