use crate::models::{CreateStudentRequest, Student, UpdateStudentRequest};
use crate::repositories::{RepositoryError, StudentRepository};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum StudentServiceError {
    #[error("Roll number and name are required")]
    MissingFields,
    #[error("Roll number already exists")]
    DuplicateRollNumber,
    #[error("Email already belongs to another student")]
    DuplicateEmail,
    #[error("Student not found")]
    NotFound,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

impl StudentServiceError {
    /// Whether the error should be reported back to the form as a notice.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            StudentServiceError::MissingFields
                | StudentServiceError::DuplicateRollNumber
                | StudentServiceError::DuplicateEmail
        )
    }
}

impl From<StudentServiceError> for crate::error::AppError {
    fn from(err: StudentServiceError) -> Self {
        match err {
            StudentServiceError::NotFound => crate::error::AppError::NotFound,
            StudentServiceError::RepositoryError(e) => crate::error::AppError::Repository(e),
            other => crate::error::AppError::Validation(other.to_string()),
        }
    }
}

fn conflict_error(message: &str) -> StudentServiceError {
    if message.contains("email") {
        StudentServiceError::DuplicateEmail
    } else {
        StudentServiceError::DuplicateRollNumber
    }
}

/// The student roster.
pub struct StudentService {
    repository: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_students(&self) -> Result<Vec<Student>, StudentServiceError> {
        Ok(self.repository.list().await?)
    }

    /// Roster ordered by roll number, as used by the marking form.
    pub async fn roster(&self) -> Result<Vec<Student>, StudentServiceError> {
        Ok(self.repository.list_by_roll_number().await?)
    }

    pub async fn get_student(&self, id: i64) -> Result<Student, StudentServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(StudentServiceError::NotFound)
    }

    pub async fn add_student(
        &self,
        request: CreateStudentRequest,
    ) -> Result<Student, StudentServiceError> {
        if request.roll_number.is_empty() || request.name.is_empty() {
            return Err(StudentServiceError::MissingFields);
        }

        if self
            .repository
            .find_by_roll_number(&request.roll_number)
            .await?
            .is_some()
        {
            return Err(StudentServiceError::DuplicateRollNumber);
        }

        match self.repository.create(request).await {
            Ok(student) => {
                tracing::info!("Added student {} ({})", student.roll_number, student.id);
                Ok(student)
            }
            Err(RepositoryError::AlreadyExists(message)) => Err(conflict_error(&message)),
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite name and email. No validation is applied to the new values.
    pub async fn update_student(
        &self,
        id: i64,
        request: UpdateStudentRequest,
    ) -> Result<(), StudentServiceError> {
        match self.repository.update(id, request).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(StudentServiceError::NotFound),
            Err(RepositoryError::AlreadyExists(message)) => Err(conflict_error(&message)),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a student and every attendance row that references it.
    pub async fn delete_student(&self, id: i64) -> Result<(), StudentServiceError> {
        match self.repository.delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted student {}", id);
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(StudentServiceError::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}
