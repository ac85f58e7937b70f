pub mod attendance_handlers;
pub mod dashboard_handlers;
pub mod report_handlers;
pub mod student_handlers;

pub use attendance_handlers::{mark_attendance_handler, mark_attendance_page, view_attendance_handler};
pub use dashboard_handlers::dashboard_handler;
pub use report_handlers::{date_report_handler, student_report_handler};
pub use student_handlers::{
    add_student_handler, add_student_page, delete_student_handler, edit_student_handler,
    edit_student_page, list_students_handler,
};

use crate::auth::RequestContext;
use crate::error::AppError;
use crate::middleware::{get_or_create_csrf_token, take_flashes, Flash};
use chrono::NaiveDate;
use tower_sessions::Session;

/// Data every rendered page needs: who is signed in, pending notices and
/// the form token.
pub struct Page {
    pub username: String,
    pub flashes: Vec<Flash>,
    pub csrf_token: String,
}

impl Page {
    pub async fn load(session: &Session, ctx: &RequestContext) -> Result<Self, AppError> {
        let flashes = take_flashes(session).await?;
        let csrf_token = get_or_create_csrf_token(session).await?;

        Ok(Self {
            username: ctx.display_name(),
            flashes,
            csrf_token,
        })
    }
}

/// Parse an optional `YYYY-MM-DD` query value. Blank values count as absent.
pub fn parse_date_param(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| format!("Invalid date: {}", value)),
    }
}
