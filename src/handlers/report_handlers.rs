use super::{parse_date_param, Page};
use crate::auth::RequestContext;
use crate::error::AppError;
use crate::models::{AttendanceEntry, StudentTally};
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Template, WebTemplate)]
#[template(path = "attendance/student_report.html")]
struct StudentReportTemplate {
    page: Page,
    report: Vec<StudentTally>,
}

#[derive(Template, WebTemplate)]
#[template(path = "attendance/date_report.html")]
struct DateReportTemplate {
    page: Page,
    records: Vec<AttendanceEntry>,
    start: String,
    end: String,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    start: Option<String>,
    end: Option<String>,
}

/// GET /attendance/student-report - Present/absent tally per student
pub async fn student_report_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    ctx.require_user()?;

    let report = state.report_service.student_report().await?;
    let page = Page::load(&session, &ctx).await?;

    Ok(StudentReportTemplate { page, report }.into_response())
}

/// GET /attendance/date-report?start=&end= - Rows within an inclusive range
pub async fn date_report_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Query(query): Query<DateRangeQuery>,
) -> Result<Response, AppError> {
    ctx.require_user()?;

    let start = query.start.unwrap_or_default();
    let end = query.end.unwrap_or_default();

    let bounds = parse_date_param(Some(start.as_str()))
        .and_then(|s| parse_date_param(Some(end.as_str())).map(|e| (s, e)));
    let (records, error) = match bounds {
        Ok((start, end)) => (
            state.attendance_service.records_between(start, end).await?,
            None,
        ),
        Err(msg) => (Vec::new(), Some(msg)),
    };

    let page = Page::load(&session, &ctx).await?;

    let template = DateReportTemplate {
        page,
        records,
        start,
        end,
        error,
    };
    Ok(template.into_response())
}
