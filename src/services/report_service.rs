use crate::error::Result;
use crate::models::{DashboardStats, StudentTally};
use sqlx::SqlitePool;

/// Aggregate queries over the attendance table.
#[derive(Clone, Debug)]
pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Overview figures for the dashboard
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let total_students = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;

        // Days on which anything was marked
        let attendance_days =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT date) FROM attendance")
                .fetch_one(&self.pool)
                .await?;

        let total_records = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance")
            .fetch_one(&self.pool)
            .await?;

        let present_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance WHERE status = 'Present'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardStats::new(
            total_students,
            attendance_days,
            total_records,
            present_count,
        ))
    }

    /// Present/absent counts per student. Students without any attendance
    /// rows do not appear.
    pub async fn student_report(&self) -> Result<Vec<StudentTally>> {
        let rows = sqlx::query_as::<_, StudentTally>(
            r#"
            SELECT
                s.id AS student_id,
                s.roll_number,
                s.name,
                CAST(SUM(CASE WHEN a.status = 'Present' THEN 1 ELSE 0 END) AS INTEGER) AS present,
                CAST(SUM(CASE WHEN a.status = 'Absent' THEN 1 ELSE 0 END) AS INTEGER) AS absent
            FROM students s
            INNER JOIN attendance a ON a.student_id = s.id
            GROUP BY s.id, s.roll_number, s.name
            ORDER BY s.roll_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
