use rollcall::{
    repositories::SqliteUserRepository,
    services::{
        auth_service::{AuthService, AuthServiceError, LoginRequest},
        user_service::{CreateUserRequest, UpdatePasswordRequest, UserService, UserServiceError},
    },
    test_utils::test_helpers,
};
use std::sync::Arc;

fn create_request(username: &str, email: &str, password: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        password_confirm: None,
    }
}

#[tokio::test]
async fn test_create_user_success() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = UserService::new(Arc::new(SqliteUserRepository::new(pool)));

    let user = service
        .create_user(create_request("teacher", "teacher@school.test", "password123"))
        .await
        .unwrap();

    assert_eq!(user.username, "teacher");
    assert_eq!(user.email, "teacher@school.test");
    assert_ne!(user.password_hash, "password123");
}

#[tokio::test]
async fn test_create_user_duplicates_are_rejected() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = UserService::new(Arc::new(SqliteUserRepository::new(pool)));

    service
        .create_user(create_request("teacher", "teacher@school.test", "password123"))
        .await
        .unwrap();

    let same_email = service
        .create_user(create_request("other", "teacher@school.test", "password123"))
        .await;
    assert!(matches!(same_email, Err(UserServiceError::AlreadyRegistered)));

    let same_username = service
        .create_user(create_request("teacher", "other@school.test", "password123"))
        .await;
    assert!(matches!(same_username, Err(UserServiceError::AlreadyRegistered)));

    assert_eq!(service.list_users().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_user_validation() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = UserService::new(Arc::new(SqliteUserRepository::new(pool)));

    let weak = service
        .create_user(create_request("teacher", "teacher@school.test", "short"))
        .await;
    assert!(matches!(weak, Err(UserServiceError::WeakPassword)));

    let bad_email = service
        .create_user(create_request("teacher", "not-an-email", "password123"))
        .await;
    assert!(matches!(bad_email, Err(UserServiceError::InvalidEmail)));

    let mismatch = service
        .create_user(CreateUserRequest {
            password_confirm: Some("different123".to_string()),
            ..create_request("teacher", "teacher@school.test", "password123")
        })
        .await;
    assert!(matches!(mismatch, Err(UserServiceError::PasswordMismatch)));
}

#[tokio::test]
async fn test_authenticate_with_registered_account() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let user_service = UserService::new(repository.clone());
    let auth_service = AuthService::new(repository);

    let created = user_service
        .create_user(create_request("teacher", "teacher@school.test", "correctpassword"))
        .await
        .unwrap();

    let user = auth_service
        .authenticate(LoginRequest {
            email: "teacher@school.test".to_string(),
            password: "correctpassword".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(user.id, created.id);

    let wrong = auth_service
        .authenticate(LoginRequest {
            email: "teacher@school.test".to_string(),
            password: "wrongpassword".to_string(),
        })
        .await;
    assert!(matches!(wrong, Err(AuthServiceError::InvalidCredentials)));

    let unknown = auth_service
        .authenticate(LoginRequest {
            email: "nobody@school.test".to_string(),
            password: "correctpassword".to_string(),
        })
        .await;
    assert!(matches!(unknown, Err(AuthServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn test_update_password() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let user_service = UserService::new(repository.clone());
    let auth_service = AuthService::new(repository);

    user_service
        .create_user(create_request("teacher", "teacher@school.test", "oldpassword123"))
        .await
        .unwrap();

    user_service
        .update_password(UpdatePasswordRequest {
            email: "teacher@school.test".to_string(),
            new_password: "newpassword456".to_string(),
            new_password_confirm: Some("newpassword456".to_string()),
        })
        .await
        .unwrap();

    let old = auth_service
        .authenticate(LoginRequest {
            email: "teacher@school.test".to_string(),
            password: "oldpassword123".to_string(),
        })
        .await;
    assert!(old.is_err());

    let new = auth_service
        .authenticate(LoginRequest {
            email: "teacher@school.test".to_string(),
            password: "newpassword456".to_string(),
        })
        .await;
    assert!(new.is_ok());
}

#[tokio::test]
async fn test_update_password_for_unknown_user() {
    let pool = test_helpers::create_test_db().await.unwrap();
    let service = UserService::new(Arc::new(SqliteUserRepository::new(pool)));

    let result = service
        .update_password(UpdatePasswordRequest {
            email: "nobody@school.test".to_string(),
            new_password: "newpassword456".to_string(),
            new_password_confirm: None,
        })
        .await;

    assert!(matches!(result, Err(UserServiceError::UserNotFound)));
}
