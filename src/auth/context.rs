use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

pub const USER_ID_KEY: &str = "user_id";
pub const USERNAME_KEY: &str = "username";

/// Identity bound to the current request's session, if any.
///
/// Extracted once per request and handed to handlers and the
/// authentication middleware explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub user_id: Option<i64>,
    pub username: Option<String>,
}

impl RequestContext {
    pub async fn from_session(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        let user_id = session.get::<i64>(USER_ID_KEY).await?;
        let username = session.get::<String>(USERNAME_KEY).await?;
        Ok(Self { user_id, username })
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// The authenticated user id, or `AuthenticationRequired` which
    /// redirects to the login page.
    pub fn require_user(&self) -> Result<i64, AppError> {
        self.user_id.ok_or(AppError::AuthenticationRequired)
    }

    pub fn display_name(&self) -> String {
        self.username.clone().unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| {
                tracing::error!("Session layer missing: {}", msg);
                AppError::InternalError
            })?;

        Ok(Self::from_session(&session).await?)
    }
}

/// Bind an authenticated identity to the session.
pub async fn sign_in(
    session: &Session,
    user_id: i64,
    username: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(USER_ID_KEY, user_id).await?;
    session.insert(USERNAME_KEY, username).await?;
    Ok(())
}
