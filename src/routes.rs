use crate::{
    auth::{self, middleware::redirect_if_authenticated},
    config::SessionLayer,
    error::not_found_handler,
    handlers,
    middleware::add_security_headers,
    AppState,
};
use axum::{
    middleware,
    response::Redirect,
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Assemble the full application router.
pub fn build_router(state: AppState, session_layer: SessionLayer) -> Router {
    let protected_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard_handler))
        // Student directory
        .route("/students/", get(handlers::list_students_handler))
        .route("/students", get(|| async { Redirect::permanent("/students/") }))
        .route(
            "/students/add",
            get(handlers::add_student_page).post(handlers::add_student_handler),
        )
        .route(
            "/students/edit/{id}",
            get(handlers::edit_student_page).post(handlers::edit_student_handler),
        )
        .route(
            "/students/delete/{id}",
            get(handlers::delete_student_handler),
        )
        // Attendance
        .route(
            "/attendance/mark",
            get(handlers::mark_attendance_page).post(handlers::mark_attendance_handler),
        )
        .route("/attendance/view", get(handlers::view_attendance_handler))
        .route(
            "/attendance/student-report",
            get(handlers::student_report_handler),
        )
        .route("/attendance/date-report", get(handlers::date_report_handler))
        .layer(middleware::from_fn(auth::middleware::require_auth));

    let login_routes = Router::new()
        .route(
            "/auth/login",
            get(auth::handlers::login_page).post(auth::handlers::login_handler),
        )
        .layer(middleware::from_fn(redirect_if_authenticated));

    Router::new()
        .route("/", get(|| async { Redirect::to("/auth/login") }))
        .merge(login_routes)
        .route("/auth/logout", get(auth::handlers::logout_handler))
        .merge(protected_routes)
        .nest_service("/static", ServeDir::new("static"))
        .fallback(not_found_handler)
        .layer(session_layer)
        .layer(middleware::from_fn(add_security_headers))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
