use super::RepositoryResult;
use crate::models::{AttendanceEntry, AttendanceStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

const ENTRY_SELECT: &str = r#"
    SELECT
        a.id,
        a.student_id,
        s.roll_number,
        s.name AS student_name,
        a.date,
        a.status,
        a.marked_at
    FROM attendance a
    INNER JOIN students s ON s.id = a.student_id
"#;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait AttendanceRepository: Send + Sync {
    /// Ids of the students that already have a row for `date`.
    async fn marked_student_ids(&self, date: NaiveDate) -> RepositoryResult<Vec<i64>>;
    /// Insert one row per entry in a single transaction. Entries whose
    /// (student, date) pair already exists are skipped. Returns the number
    /// of rows written.
    async fn insert_many(
        &self,
        date: NaiveDate,
        entries: Vec<(i64, AttendanceStatus)>,
    ) -> RepositoryResult<u64>;
    async fn list_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<AttendanceEntry>>;
    /// Rows with `start <= date <= end`.
    async fn list_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<AttendanceEntry>>;
}

pub struct SqliteAttendanceRepository {
    pool: SqlitePool,
}

impl SqliteAttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for SqliteAttendanceRepository {
    async fn marked_student_ids(&self, date: NaiveDate) -> RepositoryResult<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT student_id FROM attendance WHERE date = ?")
            .bind(date)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids)
    }

    async fn insert_many(
        &self,
        date: NaiveDate,
        entries: Vec<(i64, AttendanceStatus)>,
    ) -> RepositoryResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for (student_id, status) in entries {
            let result = sqlx::query(
                r#"
                INSERT INTO attendance (student_id, date, status)
                VALUES (?, ?, ?)
                ON CONFLICT (student_id, date) DO NOTHING
                "#,
            )
            .bind(student_id)
            .bind(date)
            .bind(status)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn list_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<AttendanceEntry>> {
        let entries = sqlx::query_as::<_, AttendanceEntry>(&format!(
            "{ENTRY_SELECT} WHERE a.date = ? ORDER BY s.roll_number"
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn list_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<AttendanceEntry>> {
        let entries = sqlx::query_as::<_, AttendanceEntry>(&format!(
            "{ENTRY_SELECT} WHERE a.date BETWEEN ? AND ? ORDER BY a.date, s.roll_number"
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
