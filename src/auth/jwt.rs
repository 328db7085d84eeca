use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::{Role, User};

/// JWT claims issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Signs and verifies JWTs with the shared HS256 secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl TokenService {
    const DEFAULT_TTL_SECONDS: i64 = 24 * 60 * 60;

    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds: Self::DEFAULT_TTL_SECONDS,
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    pub fn sign(&self, user: &User) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: 42,
            email: "user@example.com".to_string(),
            password_hash: "hash".to_string(),
            name: "Test User".to_string(),
            role: Role::Customer,
            created_at: None,
        }
    }

    #[test]
    fn sign_then_verify_roundtrips_claims() {
        let service = TokenService::new("test-secret");
        let token = service.sign(&test_user()).unwrap();

        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.role, Role::Customer);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let signer = TokenService::new("secret-a");
        let verifier = TokenService::new("secret-b");

        let token = signer.sign(&test_user()).unwrap();
        assert!(matches!(verifier.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn verify_rejects_expired_token() {
        // TTL far enough in the past to clear the default validation leeway
        let service = TokenService::new("test-secret").with_ttl(-3600);
        let token = service.sign(&test_user()).unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn verify_rejects_garbage() {
        let service = TokenService::new("test-secret");
        assert!(matches!(
            service.verify("not-a-token"),
            Err(TokenError::Invalid)
        ));
    }
}
