use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Present/absent counts for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StudentTally {
    pub student_id: i64,
    pub roll_number: String,
    pub name: String,
    pub present: i64,
    pub absent: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_students: i64,
    pub attendance_days: i64,
    pub total_records: i64,
    pub present_count: i64,
    pub attendance_percentage: f64,
}

impl DashboardStats {
    pub fn new(
        total_students: i64,
        attendance_days: i64,
        total_records: i64,
        present_count: i64,
    ) -> Self {
        Self {
            total_students,
            attendance_days,
            total_records,
            present_count,
            attendance_percentage: attendance_percentage(present_count, total_records),
        }
    }
}

/// Share of present rows as a percentage rounded to two decimals, 0 when
/// nothing has been recorded.
pub fn attendance_percentage(present: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = present as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
