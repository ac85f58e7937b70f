use super::context::{sign_in, RequestContext};
use crate::handlers::Page;
use crate::middleware::csrf::validate_csrf_form_field;
use crate::services::auth_service::{AuthServiceError, LoginRequest};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginTemplate {
    page: Page,
    error: Option<String>,
    email: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    csrf_token: String,
}

async fn render_login(session: &Session, error: Option<&str>, email: &str) -> Response {
    let page = match Page::load(session, &RequestContext::default()).await {
        Ok(page) => page,
        Err(e) => return e.into_response(),
    };

    let template = LoginTemplate {
        page,
        error: error.map(str::to_string),
        email: email.to_string(),
    };
    Html(template.render().unwrap_or_else(|_| {
        "<html><body><h1>Error rendering login page</h1></body></html>".to_string()
    }))
    .into_response()
}

/// GET /auth/login
pub async fn login_page(session: Session) -> Response {
    render_login(&session, None, "").await
}

/// POST /auth/login
pub async fn login_handler(
    State(app_state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if validate_csrf_form_field(&session, &form.csrf_token)
        .await
        .is_err()
    {
        return render_login(
            &session,
            Some("Invalid security token. Please refresh the page and try again."),
            &form.email,
        )
        .await;
    }

    let request = LoginRequest {
        email: form.email.clone(),
        password: form.password,
    };

    match app_state.auth_service.authenticate(request).await {
        Ok(user) => {
            // Fresh id for the authenticated session
            if let Err(e) = session.cycle_id().await {
                tracing::error!("Failed to rotate session id: {}", e);
                return render_login(&session, Some("Failed to create session"), &form.email)
                    .await;
            }

            if sign_in(&session, user.id, &user.username).await.is_err() {
                return render_login(&session, Some("Failed to create session"), &form.email)
                    .await;
            }

            tracing::info!("User {} signed in", user.username);
            Redirect::to("/dashboard").into_response()
        }
        Err(AuthServiceError::InvalidCredentials) => {
            tracing::warn!("Failed login attempt");
            render_login(&session, Some("Invalid email or password"), &form.email).await
        }
        Err(e) => {
            tracing::error!("Login failed: {}", e);
            render_login(
                &session,
                Some("An error occurred. Please try again."),
                &form.email,
            )
            .await
        }
    }
}

/// GET /auth/logout - Drop the whole session
pub async fn logout_handler(session: Session) -> impl IntoResponse {
    if let Err(e) = session.flush().await {
        tracing::warn!("Failed to clear session on logout: {}", e);
    }
    Redirect::to("/auth/login")
}
