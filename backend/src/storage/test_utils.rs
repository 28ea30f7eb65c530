//! Storage doubles shared by the domain and REST tests

use anyhow::{bail, Result};
use async_trait::async_trait;
use shared::{Attendance, AttendanceRecord, Youth};

use super::traits::{AttendanceStorage, YouthStorage};

/// A store whose every call fails, for exercising 500 paths
pub struct FailingStore;

#[async_trait]
impl YouthStorage for FailingStore {
    async fn store_youth(&self, _youth: &Youth) -> Result<()> {
        bail!("store unavailable")
    }

    async fn list_youth(&self) -> Result<Vec<Youth>> {
        bail!("store unavailable")
    }
}

#[async_trait]
impl AttendanceStorage for FailingStore {
    async fn store_attendance_batch(&self, _records: &[Attendance]) -> Result<()> {
        bail!("store unavailable")
    }

    async fn list_attendance_expanded(&self) -> Result<Vec<AttendanceRecord>> {
        bail!("store unavailable")
    }
}
