pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use repositories::{SqliteAttendanceRepository, SqliteStudentRepository, SqliteUserRepository};
use services::{AttendanceService, AuthService, ReportService, StudentService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub student_service: Arc<StudentService>,
    pub attendance_service: Arc<AttendanceService>,
    pub report_service: Arc<ReportService>,
}

impl AppState {
    /// Wire the SQLite repositories and services around one pool.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let student_repository = Arc::new(SqliteStudentRepository::new(pool.clone()));
        let attendance_repository = Arc::new(SqliteAttendanceRepository::new(pool.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(user_repository)),
            student_service: Arc::new(StudentService::new(student_repository.clone())),
            attendance_service: Arc::new(AttendanceService::new(
                student_repository,
                attendance_repository,
            )),
            report_service: Arc::new(ReportService::new(pool)),
        }
    }
}
