use anyhow::Context;
use serde_json::Value;
use shared::{Attendance, AttendanceRecord, NewAttendance};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::storage::AttendanceStorage;

#[derive(Debug, Error)]
pub enum RecordAttendanceError {
    #[error("Invalid attendance data format")]
    NotAnArray,

    #[error("Malformed attendance record at index {index}: {source}")]
    MalformedRecord {
        index: usize,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Service for bulk-recording and listing attendance
#[derive(Clone)]
pub struct AttendanceService {
    storage: Arc<dyn AttendanceStorage>,
}

impl AttendanceService {
    pub fn new(storage: Arc<dyn AttendanceStorage>) -> Self {
        Self { storage }
    }

    /// Decode every element of a JSON array, then store them all under fresh
    /// ids. Nothing is stored unless every element decodes and the whole
    /// batch is accepted by the store.
    pub async fn record_attendance(
        &self,
        payload: Value,
    ) -> Result<Vec<Attendance>, RecordAttendanceError> {
        let Value::Array(elements) = payload else {
            warn!("Rejected attendance payload that is not an array");
            return Err(RecordAttendanceError::NotAnArray);
        };

        let new_records = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                serde_json::from_value::<NewAttendance>(element)
                    .map_err(|source| RecordAttendanceError::MalformedRecord { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let records: Vec<Attendance> = new_records
            .into_iter()
            .map(|record| Attendance {
                id: Attendance::generate_id(),
                youth_id: record.youth_id,
                status: record.status,
                date: record.date,
            })
            .collect();

        self.storage
            .store_attendance_batch(&records)
            .await
            .context("Failed to store attendance batch")?;

        info!("Recorded {} attendance records", records.len());
        Ok(records)
    }

    /// List all attendance with youth references expanded
    pub async fn list_attendance(&self) -> anyhow::Result<Vec<AttendanceRecord>> {
        let records = self
            .storage
            .list_attendance_expanded()
            .await
            .context("Failed to list attendance")?;

        info!("Found {} attendance records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::FailingStore;
    use crate::storage::DbConnection;
    use serde_json::json;
    use shared::AttendanceStatus;

    async fn setup_test() -> AttendanceService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AttendanceService::new(Arc::new(db))
    }

    #[tokio::test]
    async fn test_record_attendance_assigns_fresh_ids_in_order() {
        let service = setup_test().await;
        let payload = json!([
            { "_id": "client-chosen", "youthId": "youth::1", "status": "present", "date": "2024-03-01" },
            { "youthId": "youth::2", "status": "absent", "date": "2024-03-01" },
        ]);

        let records = service.record_attendance(payload).await.expect("Failed to record");
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, "client-chosen");
        assert!(records.iter().all(|r| r.id.starts_with("attendance::")));
        assert_ne!(records[0].id, records[1].id);
        assert_eq!(records[0].youth_id, "youth::1");
        assert_eq!(records[1].status, AttendanceStatus::Absent);
    }

    #[tokio::test]
    async fn test_non_array_payload_is_rejected() {
        let service = setup_test().await;

        let err = service
            .record_attendance(json!({ "youthId": "youth::1", "status": "present" }))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordAttendanceError::NotAnArray));
        assert!(service.list_attendance().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_one_malformed_element_stores_nothing() {
        let service = setup_test().await;
        let payload = json!([
            { "youthId": "youth::1", "status": "present", "date": "2024-03-01" },
            { "youthId": "youth::2", "status": "late", "date": "2024-03-01" },
        ]);

        let err = service.record_attendance(payload).await.unwrap_err();
        assert!(matches!(err, RecordAttendanceError::MalformedRecord { index: 1, .. }));
        assert!(service.list_attendance().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_field_is_malformed() {
        let service = setup_test().await;
        let payload = json!([{ "youthId": "youth::1", "status": "present" }]);

        let err = service.record_attendance(payload).await.unwrap_err();
        assert!(matches!(err, RecordAttendanceError::MalformedRecord { index: 0, .. }));
    }

    #[tokio::test]
    async fn test_empty_array_returns_empty() {
        let service = setup_test().await;
        let records = service.record_attendance(json!([])).await.expect("Failed to record");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_a_storage_error() {
        let service = AttendanceService::new(Arc::new(FailingStore));
        let payload = json!([{ "youthId": "youth::1", "status": "saved", "date": "2024-03-01" }]);

        let err = service.record_attendance(payload).await.unwrap_err();
        assert!(matches!(err, RecordAttendanceError::Storage(_)));
        assert!(service.list_attendance().await.is_err());
    }
}
