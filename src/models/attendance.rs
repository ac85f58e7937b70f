use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Status recorded for a student on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, AttendanceStatus::Present)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown attendance status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AttendanceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Present" => Ok(AttendanceStatus::Present),
            "Absent" => Ok(AttendanceStatus::Absent),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_at: NaiveDateTime,
}

// Attendance row joined with the owning student, for listings
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct AttendanceEntry {
    pub id: i64,
    pub student_id: i64,
    pub roll_number: String,
    pub student_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub marked_at: NaiveDateTime,
}

/// A bulk marking submission. Statuses are the raw submitted values keyed by
/// student id; they are validated by the attendance service.
#[derive(Debug, Clone)]
pub struct MarkAttendanceRequest {
    pub date: NaiveDate,
    pub statuses: HashMap<i64, String>,
}

impl MarkAttendanceRequest {
    /// Build a request from the mark form fields (`date`, `status_<id>`).
    pub fn from_form(date: NaiveDate, fields: &HashMap<String, String>) -> Self {
        let statuses = fields
            .iter()
            .filter_map(|(key, value)| {
                let id = key.strip_prefix("status_")?.parse::<i64>().ok()?;
                Some((id, value.clone()))
            })
            .collect();

        Self { date, statuses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_is_strict() {
        assert_eq!(
            "Present".parse::<AttendanceStatus>(),
            Ok(AttendanceStatus::Present)
        );
        assert_eq!(
            "Absent".parse::<AttendanceStatus>(),
            Ok(AttendanceStatus::Absent)
        );
        assert!("present".parse::<AttendanceStatus>().is_err());
        assert!("Late".parse::<AttendanceStatus>().is_err());
        assert!("".parse::<AttendanceStatus>().is_err());
    }

    #[test]
    fn mark_request_collects_status_fields() {
        let mut fields = HashMap::new();
        fields.insert("date".to_string(), "2024-01-05".to_string());
        fields.insert("csrf_token".to_string(), "abc".to_string());
        fields.insert("status_1".to_string(), "Present".to_string());
        fields.insert("status_7".to_string(), "Absent".to_string());
        fields.insert("status_x".to_string(), "Absent".to_string());

        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let request = MarkAttendanceRequest::from_form(date, &fields);

        assert_eq!(request.statuses.len(), 2);
        assert_eq!(request.statuses.get(&1).map(String::as_str), Some("Present"));
        assert_eq!(request.statuses.get(&7).map(String::as_str), Some("Absent"));
    }
}
