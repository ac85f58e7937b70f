use super::{parse_date_param, Page};
use crate::auth::RequestContext;
use crate::error::AppError;
use crate::middleware::{push_flash, validate_csrf_form_field, FlashLevel};
use crate::models::{AttendanceEntry, MarkAttendanceRequest, Student};
use crate::services::AttendanceServiceError;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::collections::HashMap;
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "attendance/mark.html")]
struct MarkAttendanceTemplate {
    page: Page,
    students: Vec<Student>,
    today: String,
}

#[derive(Template)]
#[template(path = "attendance/view.html")]
struct ViewAttendanceTemplate {
    page: Page,
    records: Vec<AttendanceEntry>,
    selected_date: String,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    date: Option<String>,
}

/// GET /attendance/mark - Roster with a status choice per student
pub async fn mark_attendance_page(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    ctx.require_user()?;

    let students = state.student_service.roster().await?;
    let page = Page::load(&session, &ctx).await?;

    let template = MarkAttendanceTemplate {
        page,
        students,
        today: chrono::Local::now().date_naive().to_string(),
    };
    Ok(Html(template.render()?).into_response())
}

/// POST /attendance/mark - Record statuses for the chosen date
///
/// Fields: `date`, `csrf_token` and one `status_<student id>` per student.
pub async fn mark_attendance_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Response, AppError> {
    ctx.require_user()?;

    let back = Redirect::to("/attendance/mark").into_response();

    let csrf_token = fields.get("csrf_token").map(String::as_str).unwrap_or("");
    if validate_csrf_form_field(&session, csrf_token).await.is_err() {
        push_flash(
            &session,
            FlashLevel::Danger,
            "Invalid security token. Please refresh the page and try again.",
        )
        .await?;
        return Ok(back);
    }

    let date = match parse_date_param(fields.get("date").map(String::as_str)) {
        Ok(Some(date)) => date,
        Ok(None) => {
            push_flash(&session, FlashLevel::Warning, "Please select a date").await?;
            return Ok(back);
        }
        Err(msg) => {
            push_flash(&session, FlashLevel::Warning, msg).await?;
            return Ok(back);
        }
    };

    let request = MarkAttendanceRequest::from_form(date, &fields);

    match state.attendance_service.mark_attendance(request).await {
        Ok(_) => {
            push_flash(
                &session,
                FlashLevel::Success,
                "Attendance marked successfully",
            )
            .await?;
            let target = format!(
                "/attendance/view?date={}",
                urlencoding::encode(&date.to_string())
            );
            Ok(Redirect::to(&target).into_response())
        }
        Err(AttendanceServiceError::RepositoryError(e)) => Err(e.into()),
        Err(e) => {
            tracing::warn!("Rejected attendance submission for {}: {}", date, e);
            push_flash(&session, FlashLevel::Warning, e.to_string()).await?;
            Ok(back)
        }
    }
}

/// GET /attendance/view?date= - Rows recorded for one day
pub async fn view_attendance_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Query(query): Query<ViewQuery>,
) -> Result<Response, AppError> {
    ctx.require_user()?;

    let selected_date = query.date.unwrap_or_default();
    let (records, error) = match parse_date_param(Some(selected_date.as_str())) {
        Ok(date) => (state.attendance_service.records_for_date(date).await?, None),
        Err(msg) => (Vec::new(), Some(msg)),
    };

    let page = Page::load(&session, &ctx).await?;

    let template = ViewAttendanceTemplate {
        page,
        records,
        selected_date,
        error,
    };
    Ok(Html(template.render()?).into_response())
}
