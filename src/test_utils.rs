pub mod test_helpers {
    use crate::{config::SessionConfig, models::AttendanceStatus, routes, AppState};
    use axum::Router;
    use chrono::NaiveDate;
    use sqlx::{
        sqlite::{SqliteConnectOptions, SqlitePoolOptions},
        SqlitePool,
    };
    use std::str::FromStr;
    use tempfile::NamedTempFile;
    use tower_sessions_sqlx_store::SqliteStore;

    /// Create a new in-memory SQLite database for testing
    pub async fn create_test_db() -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(pool)
    }

    /// Create a temporary file-based SQLite database for testing
    /// Useful when you need to test features that don't work with in-memory databases
    pub async fn create_test_db_file() -> Result<(SqlitePool, NamedTempFile), sqlx::Error> {
        let temp_file = NamedTempFile::new().map_err(sqlx::Error::Io)?;
        let db_path = temp_file
            .path()
            .to_str()
            .ok_or_else(|| sqlx::Error::Configuration("Invalid database path".into()))?;
        let database_url = format!("sqlite://{}", db_path);

        let pool = crate::db::connect(&database_url).await?;

        // Run migrations
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok((pool, temp_file))
    }

    /// Insert a test user with hashed password
    pub async fn insert_test_user(
        pool: &SqlitePool,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<i64, sqlx::Error> {
        use argon2::{
            password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
            Argon2,
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                sqlx::Error::Configuration(format!("Password hashing failed: {}", e).into())
            })?
            .to_string();

        let result =
            sqlx::query("INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)")
                .bind(username)
                .bind(email)
                .bind(password_hash)
                .execute(pool)
                .await?;

        Ok(result.last_insert_rowid())
    }

    /// Create a test student
    pub async fn create_test_student(
        pool: &SqlitePool,
        roll_number: &str,
        name: &str,
        email: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO students (roll_number, name, email) VALUES (?, ?, ?)")
            .bind(roll_number)
            .bind(name)
            .bind(email)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Record one attendance row directly, bypassing the service layer
    pub async fn insert_attendance(
        pool: &SqlitePool,
        student_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO attendance (student_id, date, status) VALUES (?, ?, ?)")
            .bind(student_id)
            .bind(date)
            .bind(status)
            .execute(pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn count_rows(pool: &SqlitePool, table: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await
    }

    /// Build the full application router over the given pool
    pub async fn test_app(pool: SqlitePool) -> Result<Router, sqlx::Error> {
        let session_store = SqliteStore::new(pool.clone());
        session_store.migrate().await?;
        let session_layer = SessionConfig::from_env().create_layer(session_store);

        Ok(routes::build_router(AppState::new(pool), session_layer))
    }
}

// Note: This is test-only code. Panic on error is acceptable in tests.
#[cfg(test)]
pub async fn create_test_pool() -> sqlx::SqlitePool {
    match test_helpers::create_test_db().await {
        Ok(pool) => pool,
        Err(e) => panic!("Failed to create test pool: {}", e),
    }
}
