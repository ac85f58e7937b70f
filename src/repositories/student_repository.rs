use super::{map_unique_violation, RepositoryError, RepositoryResult};
use crate::models::{CreateStudentRequest, Student, UpdateStudentRequest};
use async_trait::async_trait;
use sqlx::SqlitePool;

const STUDENT_COLUMNS: &str = "id, roll_number, name, email, created_at";

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait StudentRepository: Send + Sync {
    async fn create(&self, request: CreateStudentRequest) -> RepositoryResult<Student>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Student>>;
    async fn find_by_roll_number(&self, roll_number: &str) -> RepositoryResult<Option<Student>>;
    /// Every student, in insertion order.
    async fn list(&self) -> RepositoryResult<Vec<Student>>;
    /// Every student, ordered by roll number.
    async fn list_by_roll_number(&self) -> RepositoryResult<Vec<Student>>;
    async fn update(&self, id: i64, request: UpdateStudentRequest) -> RepositoryResult<()>;
    /// Remove a student together with its attendance rows.
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}

pub struct SqliteStudentRepository {
    pool: SqlitePool,
}

impl SqliteStudentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for SqliteStudentRepository {
    async fn create(&self, request: CreateStudentRequest) -> RepositoryResult<Student> {
        let result = sqlx::query("INSERT INTO students (roll_number, name, email) VALUES (?, ?, ?)")
            .bind(&request.roll_number)
            .bind(&request.name)
            .bind(&request.email)
            .execute(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        let id = result.last_insert_rowid();
        self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn find_by_roll_number(&self, roll_number: &str) -> RepositoryResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE roll_number = ?"
        ))
        .bind(roll_number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    async fn list(&self) -> RepositoryResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    async fn list_by_roll_number(&self) -> RepositoryResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students ORDER BY roll_number"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    async fn update(&self, id: i64, request: UpdateStudentRequest) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE students SET name = ?, email = ? WHERE id = ?")
            .bind(&request.name)
            .bind(&request.email)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        // Dependent attendance rows first, in the same transaction
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM attendance WHERE student_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;
        Ok(())
    }
}
