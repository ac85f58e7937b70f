use crate::models::{AttendanceEntry, AttendanceStatus, MarkAttendanceRequest};
use crate::repositories::{AttendanceRepository, RepositoryError, StudentRepository};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AttendanceServiceError {
    #[error("No status submitted for {0}")]
    MissingStatus(String),
    #[error("Invalid status {value:?} for {roll_number}")]
    InvalidStatus { roll_number: String, value: String },
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

impl From<AttendanceServiceError> for crate::error::AppError {
    fn from(err: AttendanceServiceError) -> Self {
        match err {
            AttendanceServiceError::RepositoryError(e) => crate::error::AppError::Repository(e),
            other => crate::error::AppError::Validation(other.to_string()),
        }
    }
}

/// Result of a marking submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOutcome {
    pub inserted: u64,
    pub skipped: u64,
}

pub struct AttendanceService {
    students: Arc<dyn StudentRepository>,
    attendance: Arc<dyn AttendanceRepository>,
}

impl AttendanceService {
    pub fn new(
        students: Arc<dyn StudentRepository>,
        attendance: Arc<dyn AttendanceRepository>,
    ) -> Self {
        Self {
            students,
            attendance,
        }
    }

    /// Record one status per roster student for the requested date.
    ///
    /// Students that already have a row for the date are skipped; their
    /// existing status is never changed. Every student that would receive a
    /// new row must have a valid status, otherwise nothing is written.
    pub async fn mark_attendance(
        &self,
        request: MarkAttendanceRequest,
    ) -> Result<MarkOutcome, AttendanceServiceError> {
        let roster = self.students.list_by_roll_number().await?;
        let already_marked: HashSet<i64> = self
            .attendance
            .marked_student_ids(request.date)
            .await?
            .into_iter()
            .collect();

        let mut entries = Vec::with_capacity(roster.len());
        for student in &roster {
            if already_marked.contains(&student.id) {
                continue;
            }

            let raw = request
                .statuses
                .get(&student.id)
                .ok_or_else(|| AttendanceServiceError::MissingStatus(student.roll_number.clone()))?;

            let status = raw
                .parse::<AttendanceStatus>()
                .map_err(|_| AttendanceServiceError::InvalidStatus {
                    roll_number: student.roll_number.clone(),
                    value: raw.clone(),
                })?;

            entries.push((student.id, status));
        }

        let attempted = entries.len() as u64;
        let inserted = if entries.is_empty() {
            0
        } else {
            self.attendance.insert_many(request.date, entries).await?
        };

        let outcome = MarkOutcome {
            inserted,
            skipped: roster.len() as u64 - attempted + (attempted - inserted),
        };

        tracing::info!(
            "Marked attendance for {}: {} new, {} skipped",
            request.date,
            outcome.inserted,
            outcome.skipped
        );

        Ok(outcome)
    }

    /// All rows for a date, or nothing when no date was chosen.
    pub async fn records_for_date(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceEntry>, AttendanceServiceError> {
        match date {
            Some(date) => Ok(self.attendance.list_by_date(date).await?),
            None => Ok(Vec::new()),
        }
    }

    /// All rows within the inclusive range, or nothing when a bound is
    /// missing.
    pub async fn records_between(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceEntry>, AttendanceServiceError> {
        match (start, end) {
            (Some(start), Some(end)) => Ok(self.attendance.list_between(start, end).await?),
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Student;
    use crate::repositories::attendance_repository::MockAttendanceRepository;
    use crate::repositories::student_repository::MockStudentRepository;
    use std::collections::HashMap;

    fn roster() -> Vec<Student> {
        vec![
            Student {
                id: 1,
                roll_number: "R-01".to_string(),
                name: "Asha".to_string(),
                email: None,
                created_at: chrono::NaiveDateTime::default(),
            },
            Student {
                id: 2,
                roll_number: "R-02".to_string(),
                name: "Ben".to_string(),
                email: None,
                created_at: chrono::NaiveDateTime::default(),
            },
        ]
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn students_mock() -> MockStudentRepository {
        let mut students = MockStudentRepository::new();
        students
            .expect_list_by_roll_number()
            .returning(|| Box::pin(async move { Ok(roster()) }));
        students
    }

    #[tokio::test]
    async fn test_mark_skips_already_marked_students() {
        let mut attendance = MockAttendanceRepository::new();
        attendance
            .expect_marked_student_ids()
            .returning(|_| Box::pin(async move { Ok(vec![1]) }));
        attendance
            .expect_insert_many()
            .withf(|date, entries| {
                *date == day() && entries.as_slice() == [(2, AttendanceStatus::Absent)]
            })
            .times(1)
            .returning(|_, _| Box::pin(async move { Ok(1) }));

        let service = AttendanceService::new(Arc::new(students_mock()), Arc::new(attendance));

        let mut statuses = HashMap::new();
        statuses.insert(1, "Absent".to_string());
        statuses.insert(2, "Absent".to_string());

        let outcome = service
            .mark_attendance(MarkAttendanceRequest {
                date: day(),
                statuses,
            })
            .await
            .unwrap();

        assert_eq!(
            outcome,
            MarkOutcome {
                inserted: 1,
                skipped: 1
            }
        );
    }

    #[tokio::test]
    async fn test_mark_rejects_unknown_status() {
        let mut attendance = MockAttendanceRepository::new();
        attendance
            .expect_marked_student_ids()
            .returning(|_| Box::pin(async move { Ok(vec![]) }));
        attendance.expect_insert_many().never();

        let service = AttendanceService::new(Arc::new(students_mock()), Arc::new(attendance));

        let mut statuses = HashMap::new();
        statuses.insert(1, "Present".to_string());
        statuses.insert(2, "Late".to_string());

        let result = service
            .mark_attendance(MarkAttendanceRequest {
                date: day(),
                statuses,
            })
            .await;

        assert!(matches!(
            result,
            Err(AttendanceServiceError::InvalidStatus { ref roll_number, .. }) if roll_number == "R-02"
        ));
    }

    #[tokio::test]
    async fn test_mark_requires_status_for_unmarked_students() {
        let mut attendance = MockAttendanceRepository::new();
        attendance
            .expect_marked_student_ids()
            .returning(|_| Box::pin(async move { Ok(vec![]) }));
        attendance.expect_insert_many().never();

        let service = AttendanceService::new(Arc::new(students_mock()), Arc::new(attendance));

        let mut statuses = HashMap::new();
        statuses.insert(1, "Present".to_string());

        let result = service
            .mark_attendance(MarkAttendanceRequest {
                date: day(),
                statuses,
            })
            .await;

        assert!(matches!(result, Err(AttendanceServiceError::MissingStatus(_))));
    }

    #[tokio::test]
    async fn test_records_for_missing_date_is_empty() {
        let mut attendance = MockAttendanceRepository::new();
        attendance.expect_list_by_date().never();

        let service = AttendanceService::new(
            Arc::new(MockStudentRepository::new()),
            Arc::new(attendance),
        );

        let records = service.records_for_date(None).await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_records_between_needs_both_bounds() {
        let mut attendance = MockAttendanceRepository::new();
        attendance.expect_list_between().never();

        let service = AttendanceService::new(
            Arc::new(MockStudentRepository::new()),
            Arc::new(attendance),
        );

        let records = service.records_between(Some(day()), None).await.unwrap();
        assert!(records.is_empty());

        let records = service.records_between(None, Some(day())).await.unwrap();
        assert!(records.is_empty());
    }
}
