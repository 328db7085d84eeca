use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{Claims, TokenService};
use crate::error::ApiError;

/// Require a valid `Authorization: Bearer <jwt>` header. The verified claims
/// are inserted into request extensions for the handlers.
pub async fn require_jwt(
    State(tokens): State<TokenService>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let token = match header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => return ApiError::InvalidToken.into_response(),
    };

    match tokens.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(_) => ApiError::InvalidToken.into_response(),
    }
}

/// Require the admin role. Must run after `require_jwt`.
pub async fn require_admin(request: Request, next: Next) -> Response {
    match request.extensions().get::<Claims>() {
        Some(claims) if claims.role.is_admin() => next.run(request).await,
        _ => ApiError::AdminRequired.into_response(),
    }
}
