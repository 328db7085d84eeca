use std::sync::Arc;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopfront::auth::TokenService;
use shopfront::models::Role;
use shopfront::repositories::SqliteUserRepository;
use shopfront::services::auth_service::{
    AuthService, AuthServiceError, LoginRequest, RegisterRequest,
};
use shopfront::services::ProfileSyncClient;
use shopfront::test_utils::test_helpers;

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.to_string(),
        password: "password123".to_string(),
        name: "Test User".to_string(),
    }
}

async fn service_without_sync() -> AuthService {
    let pool = test_helpers::create_auth_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    AuthService::new(repository, TokenService::new("test-secret"), None)
}

#[tokio::test]
async fn test_register_returns_user_and_valid_token() {
    let service = service_without_sync().await;

    let payload = service
        .register(register_request("new@example.com"))
        .await
        .unwrap();

    assert_eq!(payload.user.email, "new@example.com");
    assert_eq!(payload.user.role, Role::Customer);

    let claims = service.validate_token(&payload.token).unwrap();
    assert_eq!(claims.user_id(), Some(payload.user.id));
    assert_eq!(claims.email, "new@example.com");
}

#[tokio::test]
async fn test_register_duplicate_email_rejected() {
    let service = service_without_sync().await;

    service
        .register(register_request("dup@example.com"))
        .await
        .unwrap();

    let result = service.register(register_request("dup@example.com")).await;
    assert!(matches!(result, Err(AuthServiceError::UserAlreadyExists)));
}

#[tokio::test]
async fn test_login_roundtrip() {
    let service = service_without_sync().await;
    service
        .register(register_request("login@example.com"))
        .await
        .unwrap();

    let payload = service
        .login(LoginRequest {
            email: "login@example.com".to_string(),
            password: "password123".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(payload.user.email, "login@example.com");
    assert!(service.validate_token(&payload.token).is_ok());
}

#[tokio::test]
async fn test_login_wrong_password_rejected() {
    let service = service_without_sync().await;
    service
        .register(register_request("secure@example.com"))
        .await
        .unwrap();

    let result = service
        .login(LoginRequest {
            email: "secure@example.com".to_string(),
            password: "wrong-password".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AuthServiceError::InvalidCredentials)));
}

#[tokio::test]
async fn test_validate_rejects_garbage_token() {
    let service = service_without_sync().await;
    assert!(matches!(
        service.validate_token("definitely-not-a-jwt"),
        Err(AuthServiceError::InvalidToken)
    ));
}

#[tokio::test]
async fn test_register_syncs_profile_to_user_service() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/sync"))
        .and(body_partial_json(serde_json::json!({
            "email": "synced@example.com",
            "role": "customer",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Profile synced successfully",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pool = test_helpers::create_auth_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = AuthService::new(
        repository,
        TokenService::new("test-secret"),
        Some(ProfileSyncClient::new(mock_server.uri())),
    );

    let payload = service
        .register(register_request("synced@example.com"))
        .await
        .unwrap();
    assert_eq!(payload.user.email, "synced@example.com");
}

#[tokio::test]
async fn test_register_succeeds_when_sync_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/sync"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pool = test_helpers::create_auth_db().await.unwrap();
    let repository = Arc::new(SqliteUserRepository::new(pool));
    let service = AuthService::new(
        repository,
        TokenService::new("test-secret"),
        Some(ProfileSyncClient::new(mock_server.uri())),
    );

    // Sync failure is best-effort; the account must still exist and log in
    let result = service.register(register_request("resilient@example.com")).await;
    assert!(result.is_ok());

    let login = service
        .login(LoginRequest {
            email: "resilient@example.com".to_string(),
            password: "password123".to_string(),
        })
        .await;
    assert!(login.is_ok());
}
