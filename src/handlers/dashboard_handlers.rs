use super::Page;
use crate::auth::RequestContext;
use crate::error::AppError;
use crate::models::DashboardStats;
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    page: Page,
    stats: DashboardStats,
}

/// GET /dashboard - Summary statistics
pub async fn dashboard_handler(
    State(state): State<AppState>,
    session: Session,
    ctx: RequestContext,
) -> Result<Response, AppError> {
    ctx.require_user()?;

    let stats = state.report_service.dashboard_stats().await?;
    let page = Page::load(&session, &ctx).await?;

    Ok(DashboardTemplate { page, stats }.into_response())
}
