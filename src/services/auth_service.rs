use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::auth::jwt::{Claims, TokenError, TokenService};
use crate::models::user::PublicUser;
use crate::models::{Role, User};
use crate::repositories::{RepositoryError, UserRepository};
use crate::services::profile_sync::{ProfileSyncClient, SyncProfileRequest};

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password too weak (minimum 8 characters)")]
    WeakPassword,
    #[error("Password hashing failed: {0}")]
    HashingError(String),
    #[error("Token signing failed: {0}")]
    TokenError(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// What register and login hand back: the public user plus a signed JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: PublicUser,
    pub token: String,
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
    profile_sync: Option<ProfileSyncClient>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tokens: TokenService,
        profile_sync: Option<ProfileSyncClient>,
    ) -> Self {
        Self {
            users,
            tokens,
            profile_sync,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthPayload, AuthServiceError> {
        self.validate_email(&request.email)?;
        self.validate_password(&request.password)?;

        let password_hash = self.hash_password(&request.password)?;

        let user = match self
            .users
            .create_user(&request.email, &password_hash, &request.name, Role::Customer)
            .await
        {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists) => {
                return Err(AuthServiceError::UserAlreadyExists)
            }
            Err(e) => return Err(AuthServiceError::RepositoryError(e)),
        };

        // Best-effort profile sync to the user service. The account exists
        // and can authenticate even when the sync fails.
        self.sync_profile(&user).await;

        self.issue_token(user)
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthPayload, AuthServiceError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !self.verify_password(&request.password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        self.issue_token(user)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthServiceError> {
        self.tokens.verify(token).map_err(|e| match e {
            TokenError::Invalid => AuthServiceError::InvalidToken,
            TokenError::Signing(msg) => AuthServiceError::TokenError(msg),
        })
    }

    /// Push the profile to the user service, logging failure instead of
    /// propagating it.
    pub async fn sync_profile(&self, user: &User) {
        let Some(sync) = &self.profile_sync else {
            return;
        };

        let request = SyncProfileRequest {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
        };

        if let Err(e) = sync.sync(&request).await {
            tracing::warn!(user_id = user.id, "profile sync to user service failed: {}", e);
        }
    }

    fn issue_token(&self, user: User) -> Result<AuthPayload, AuthServiceError> {
        let token = self
            .tokens
            .sign(&user)
            .map_err(|e| AuthServiceError::TokenError(e.to_string()))?;

        Ok(AuthPayload {
            user: user.public(),
            token,
        })
    }

    fn validate_email(&self, email: &str) -> Result<(), AuthServiceError> {
        if !email.contains('@') || email.len() > 255 || email.is_empty() {
            return Err(AuthServiceError::InvalidEmail);
        }
        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), AuthServiceError> {
        if password.len() < 8 {
            return Err(AuthServiceError::WeakPassword);
        }
        Ok(())
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthServiceError::HashingError(e.to_string()))
    }

    pub fn verify_password(&self, password: &str, password_hash: &str) -> bool {
        if let Ok(parsed_hash) = PasswordHash::new(password_hash) {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        } else {
            false
        }
    }
}
