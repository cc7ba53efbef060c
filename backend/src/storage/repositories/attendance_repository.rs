use anyhow::{Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::models::attendance::{AttendanceMode, AttendanceRecord};
use crate::storage::connection::DbConnection;

/// Repository for attendance rows. The table, and with it the row key, is
/// chosen by the `AttendanceMode` passed to each call.
#[derive(Clone)]
pub struct AttendanceRepository {
    db: DbConnection,
}

impl AttendanceRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert or replace the attendance row for the record's key
    pub async fn upsert_attendance(&self, record: &AttendanceRecord, mode: AttendanceMode) -> Result<()> {
        let sql = format!(
            r#"
            INSERT OR REPLACE INTO {} (worker_id, worker_name, date, time_of_arrival, time_of_departure)
            VALUES (?, ?, ?, ?, ?)
            "#,
            mode.table()
        );

        sqlx::query(&sql)
            .bind(&record.worker_id)
            .bind(&record.worker_name)
            .bind(record.date)
            .bind(record.time_of_arrival)
            .bind(record.time_of_departure)
            .execute(self.db.pool())
            .await
            .with_context(|| format!("failed to store attendance for worker {}", record.worker_id))?;
        Ok(())
    }

    /// Get the worker's attendance row; in daily mode, the most recent day
    pub async fn get_attendance(&self, worker_id: &str, mode: AttendanceMode) -> Result<Option<AttendanceRecord>> {
        let sql = format!(
            r#"
            SELECT worker_id, worker_name, date, time_of_arrival, time_of_departure
            FROM {}
            WHERE worker_id = ?
            ORDER BY date DESC
            LIMIT 1
            "#,
            mode.table()
        );

        let row = sqlx::query(&sql)
            .bind(worker_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(attendance_from_row).transpose()
    }

    /// List all attendance rows ordered by date, then worker
    pub async fn list_attendance(&self, mode: AttendanceMode) -> Result<Vec<AttendanceRecord>> {
        let sql = format!(
            r#"
            SELECT worker_id, worker_name, date, time_of_arrival, time_of_departure
            FROM {}
            ORDER BY date ASC, worker_id ASC
            "#,
            mode.table()
        );

        let rows = sqlx::query(&sql).fetch_all(self.db.pool()).await?;
        rows.iter().map(attendance_from_row).collect()
    }
}

fn attendance_from_row(row: &SqliteRow) -> Result<AttendanceRecord> {
    Ok(AttendanceRecord {
        worker_id: row.try_get("worker_id")?,
        worker_name: row.try_get::<Option<String>, _>("worker_name")?.unwrap_or_default(),
        date: row.try_get("date")?,
        time_of_arrival: row.try_get("time_of_arrival")?,
        time_of_departure: row.try_get("time_of_departure")?,
    })
}
