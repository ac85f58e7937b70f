pub mod attendance_repository;
pub mod student_repository;
pub mod user_repository;

pub use attendance_repository::{AttendanceRepository, SqliteAttendanceRepository};
pub use student_repository::{SqliteStudentRepository, StudentRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Record already exists: {0}")]
    AlreadyExists(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Map UNIQUE constraint failures to `AlreadyExists`, carrying the
/// database message so callers can tell which column collided.
pub(crate) fn map_unique_violation(err: sqlx::Error) -> RepositoryError {
    let message = err
        .as_database_error()
        .filter(|db| db.is_unique_violation())
        .map(|db| db.message().to_string());

    match message {
        Some(message) => RepositoryError::AlreadyExists(message),
        None => RepositoryError::Database(err),
    }
}
