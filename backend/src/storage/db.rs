use anyhow::Result;
use async_trait::async_trait;
use shared::{Attendance, AttendanceRecord, AttendanceStatus, Youth, YouthRef};
use sqlx::{migrate::MigrateDatabase, sqlite::SqliteRow, Row, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

use super::traits::{AttendanceStorage, YouthStorage};

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS youth (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                birthday TEXT NOT NULL,
                address TEXT NOT NULL,
                education_level TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        // youth_id is not a foreign key: a record may outlive its youth
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS attendance (
                id TEXT PRIMARY KEY,
                youth_id TEXT NOT NULL,
                status TEXT NOT NULL CHECK (status IN ('present', 'absent', 'saved')),
                date TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_attendance_youth_id ON attendance (youth_id)")
            .execute(pool)
            .await?;

        Ok(())
    }

    #[cfg(test)]
    fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn youth_from_row(row: &SqliteRow) -> Result<Youth> {
    Ok(Youth {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        birthday: row.try_get("birthday")?,
        address: row.try_get("address")?,
        education_level: row.try_get("education_level")?,
    })
}

/// Map one row of the attendance/youth left join
fn attendance_record_from_row(row: &SqliteRow) -> Result<AttendanceRecord> {
    let youth_id = match row.try_get::<Option<String>, _>("y_id")? {
        Some(id) => YouthRef::Expanded(Youth {
            id,
            user_id: row.try_get("y_user_id")?,
            first_name: row.try_get("y_first_name")?,
            last_name: row.try_get("y_last_name")?,
            birthday: row.try_get("y_birthday")?,
            address: row.try_get("y_address")?,
            education_level: row.try_get("y_education_level")?,
        }),
        None => YouthRef::Id(row.try_get("youth_id")?),
    };

    let status: String = row.try_get("status")?;

    Ok(AttendanceRecord {
        id: row.try_get("id")?,
        youth_id,
        status: status.parse::<AttendanceStatus>()?,
        date: row.try_get("date")?,
    })
}

#[async_trait]
impl YouthStorage for DbConnection {
    async fn store_youth(&self, youth: &Youth) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO youth (id, user_id, first_name, last_name, birthday, address, education_level)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&youth.id)
        .bind(&youth.user_id)
        .bind(&youth.first_name)
        .bind(&youth.last_name)
        .bind(&youth.birthday)
        .bind(&youth.address)
        .bind(&youth.education_level)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn list_youth(&self) -> Result<Vec<Youth>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, first_name, last_name, birthday, address, education_level
            FROM youth
            ORDER BY rowid
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(youth_from_row).collect()
    }
}

#[async_trait]
impl AttendanceStorage for DbConnection {
    async fn store_attendance_batch(&self, records: &[Attendance]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query("INSERT INTO attendance (id, youth_id, status, date) VALUES (?, ?, ?, ?)")
                .bind(&record.id)
                .bind(&record.youth_id)
                .bind(record.status.as_str())
                .bind(&record.date)
                .execute(&mut *tx)
                .await?;
        }

        // Dropping the transaction on an early return rolls it back
        tx.commit().await?;
        Ok(())
    }

    async fn list_attendance_expanded(&self) -> Result<Vec<AttendanceRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT a.id, a.youth_id, a.status, a.date,
                   y.id AS y_id,
                   y.user_id AS y_user_id,
                   y.first_name AS y_first_name,
                   y.last_name AS y_last_name,
                   y.birthday AS y_birthday,
                   y.address AS y_address,
                   y.education_level AS y_education_level
            FROM attendance a
            LEFT JOIN youth y ON y.id = a.youth_id
            ORDER BY a.rowid
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        rows.iter().map(attendance_record_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> DbConnection {
        DbConnection::init_test().await.expect("Failed to create test database")
    }

    fn youth(id: &str, first: &str, last: &str) -> Youth {
        Youth {
            id: id.to_string(),
            user_id: "staff::1".to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            birthday: "2012-04-01".to_string(),
            address: "12 Hill Road".to_string(),
            education_level: "Primary".to_string(),
        }
    }

    fn attendance(id: &str, youth_id: &str, status: AttendanceStatus) -> Attendance {
        Attendance {
            id: id.to_string(),
            youth_id: youth_id.to_string(),
            status,
            date: "2024-03-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_store_and_list_youth_in_insertion_order() {
        let db = setup_test().await;

        db.store_youth(&youth("youth::b", "Mary", "Smith")).await.expect("Failed to store youth");
        db.store_youth(&youth("youth::a", "Anna", "Lee")).await.expect("Failed to store youth");

        let youths = db.list_youth().await.expect("Failed to list youth");
        assert_eq!(youths.len(), 2);
        assert_eq!(youths[0].id, "youth::b");
        assert_eq!(youths[1], youth("youth::a", "Anna", "Lee"));
    }

    #[tokio::test]
    async fn test_list_youth_empty() {
        let db = setup_test().await;
        let youths = db.list_youth().await.expect("Failed to list youth");
        assert!(youths.is_empty());
    }

    #[tokio::test]
    async fn test_attendance_expands_resolved_youth() {
        let db = setup_test().await;
        let anna = youth("youth::a", "Anna", "Lee");
        db.store_youth(&anna).await.expect("Failed to store youth");

        db.store_attendance_batch(&[
            attendance("attendance::1", "youth::a", AttendanceStatus::Present),
            attendance("attendance::2", "youth::a", AttendanceStatus::Saved),
        ])
        .await
        .expect("Failed to store batch");

        let records = db.list_attendance_expanded().await.expect("Failed to list attendance");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "attendance::1");
        assert_eq!(records[0].youth_id, YouthRef::Expanded(anna));
        assert_eq!(records[1].status, AttendanceStatus::Saved);
    }

    #[tokio::test]
    async fn test_dangling_youth_reference_stays_an_id() {
        let db = setup_test().await;

        db.store_attendance_batch(&[attendance("attendance::1", "youth::gone", AttendanceStatus::Absent)])
            .await
            .expect("Failed to store batch");

        let records = db.list_attendance_expanded().await.expect("Failed to list attendance");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].youth_id, YouthRef::Id("youth::gone".to_string()));
    }

    #[tokio::test]
    async fn test_failed_batch_stores_nothing() {
        let db = setup_test().await;

        // Second record collides with the first on the primary key
        let result = db
            .store_attendance_batch(&[
                attendance("attendance::dup", "youth::a", AttendanceStatus::Present),
                attendance("attendance::dup", "youth::b", AttendanceStatus::Absent),
            ])
            .await;
        assert!(result.is_err());

        let records = db.list_attendance_expanded().await.expect("Failed to list attendance");
        assert!(records.is_empty(), "Partial batch should have been rolled back");
    }

    #[tokio::test]
    async fn test_schema_rejects_unknown_status() {
        let db = setup_test().await;
        let result = sqlx::query("INSERT INTO attendance (id, youth_id, status, date) VALUES (?, ?, ?, ?)")
            .bind("attendance::x")
            .bind("youth::a")
            .bind("late")
            .bind("2024-03-01")
            .execute(db.pool())
            .await;
        assert!(result.is_err());

        let index: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'index' AND name = 'idx_attendance_youth_id'",
        )
        .fetch_optional(db.pool())
        .await
        .expect("Failed to read schema");
        assert_eq!(index.as_deref(), Some("idx_attendance_youth_id"));
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_no_op() {
        let db = setup_test().await;
        db.store_attendance_batch(&[]).await.expect("Empty batch should succeed");
        assert!(db.list_attendance_expanded().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_database_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite:{}", dir.path().join("netcompassion.db").display());

        let db = DbConnection::new(&url).await.expect("Failed to create database");
        db.store_youth(&youth("youth::a", "Anna", "Lee")).await.expect("Failed to store youth");
        db.store_attendance_batch(&[attendance("attendance::1", "youth::a", AttendanceStatus::Present)])
            .await
            .expect("Failed to store batch");
        db.close().await;

        let reopened = DbConnection::new(&url).await.expect("Failed to reopen database");
        let youths = reopened.list_youth().await.expect("Failed to list youth");
        assert_eq!(youths.len(), 1);
        assert_eq!(youths[0].first_name, "Anna");

        let records = reopened.list_attendance_expanded().await.expect("Failed to list attendance");
        assert_eq!(records[0].youth_id.id(), "youth::a");
        assert!(records[0].youth_id.expanded().is_some());
    }
}
