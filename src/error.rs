use crate::repositories::RepositoryError;
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use thiserror::Error;

// Type alias for Result with our AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error")]
    InternalError,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
struct NotFoundTemplate;

#[derive(Template)]
#[template(path = "errors/500.html")]
struct ServerErrorTemplate;

/// Render the dedicated "not found" page.
pub fn not_found_page() -> Response {
    let body = NotFoundTemplate
        .render()
        .unwrap_or_else(|_| "<h1>404 - Page not found</h1>".to_string());
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

/// Render the dedicated "server error" page.
pub fn server_error_page() -> Response {
    let body = ServerErrorTemplate
        .render()
        .unwrap_or_else(|_| "<h1>500 - Something went wrong</h1>".to_string());
    (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::AuthenticationRequired => Redirect::to("/auth/login").into_response(),
            AppError::NotFound => not_found_page(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Database(_)
            | AppError::Repository(_)
            | AppError::Session(_)
            | AppError::Template(_)
            | AppError::InternalError => {
                tracing::error!("Request failed: {}", self);
                server_error_page()
            }
        }
    }
}

/// Fallback handler for unknown routes.
pub async fn not_found_handler() -> Response {
    not_found_page()
}
