use super::Page;
use crate::auth::RequestContext;
use crate::error::AppError;
use crate::middleware::{push_flash, validate_csrf_form_field, FlashLevel};
use crate::models::{CreateStudentForm, Student, UpdateStudentForm};
use crate::services::StudentServiceError;
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tower_sessions::Session;

const INVALID_TOKEN: &str = "Invalid security token. Please refresh the page and try again.";

/// Student ids in paths are integers; anything else is an unknown page.
fn parse_student_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| AppError::NotFound)
}

#[derive(Template)]
#[template(path = "students/list.html")]
struct StudentListTemplate {
    page: Page,
    students: Vec<Student>,
}

#[derive(Template)]
#[template(path = "students/add.html")]
struct AddStudentTemplate {
    page: Page,
}

#[derive(Template)]
#[template(path = "students/edit.html")]
struct EditStudentTemplate {
    page: Page,
    student: Student,
}

/// GET /students/ - Roster listing
pub async fn list_students_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    ctx.require_user()?;

    let students = state.student_service.list_students().await?;
    let page = Page::load(&session, &ctx).await?;

    let template = StudentListTemplate { page, students };
    Ok(Html(template.render()?).into_response())
}

/// GET /students/add - Display add student form
pub async fn add_student_page(
    session: Session,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    ctx.require_user()?;

    let page = Page::load(&session, &ctx).await?;
    Ok(Html(AddStudentTemplate { page }.render()?).into_response())
}

/// POST /students/add - Create student
pub async fn add_student_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Form(form): Form<CreateStudentForm>,
) -> Result<Response, AppError> {
    ctx.require_user()?;

    if validate_csrf_form_field(&session, &form.csrf_token)
        .await
        .is_err()
    {
        push_flash(&session, FlashLevel::Danger, INVALID_TOKEN).await?;
        return Ok(Redirect::to("/students/add").into_response());
    }

    match state.student_service.add_student(form.into()).await {
        Ok(_) => {
            push_flash(&session, FlashLevel::Success, "Student added successfully").await?;
            Ok(Redirect::to("/students/").into_response())
        }
        Err(e) if e.is_user_facing() => {
            tracing::warn!("Rejected new student: {}", e);
            push_flash(&session, FlashLevel::Warning, e.to_string()).await?;
            Ok(Redirect::to("/students/add").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /students/edit/:id - Display edit form
pub async fn edit_student_page(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    ctx.require_user()?;
    let id = parse_student_id(&raw_id)?;

    let student = state.student_service.get_student(id).await?;
    let page = Page::load(&session, &ctx).await?;

    let template = EditStudentTemplate { page, student };
    Ok(Html(template.render()?).into_response())
}

/// POST /students/edit/:id - Overwrite name and email
pub async fn edit_student_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Path(raw_id): Path<String>,
    Form(form): Form<UpdateStudentForm>,
) -> Result<Response, AppError> {
    ctx.require_user()?;
    let id = parse_student_id(&raw_id)?;

    let student = state.student_service.get_student(id).await?;
    let edit_url = format!("/students/edit/{}", student.id);

    if validate_csrf_form_field(&session, &form.csrf_token)
        .await
        .is_err()
    {
        push_flash(&session, FlashLevel::Danger, INVALID_TOKEN).await?;
        return Ok(Redirect::to(&edit_url).into_response());
    }

    match state.student_service.update_student(id, form.into()).await {
        Ok(()) => {
            push_flash(&session, FlashLevel::Success, "Student updated successfully").await?;
            Ok(Redirect::to("/students/").into_response())
        }
        Err(e) if e.is_user_facing() => {
            tracing::warn!("Rejected update of student {}: {}", id, e);
            push_flash(&session, FlashLevel::Warning, e.to_string()).await?;
            Ok(Redirect::to(&edit_url).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /students/delete/:id - Delete student and its attendance
pub async fn delete_student_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    ctx.require_user()?;
    let id = parse_student_id(&raw_id)?;

    match state.student_service.delete_student(id).await {
        Ok(()) => {
            push_flash(&session, FlashLevel::Success, "Student deleted successfully").await?;
            Ok(Redirect::to("/students/").into_response())
        }
        Err(StudentServiceError::NotFound) => Err(AppError::NotFound),
        Err(e) => Err(e.into()),
    }
}
