use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

// Type alias for Result with our ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// HTTP-level error for the JSON APIs. Every variant renders as the standard
/// response envelope with `success: false` and a fixed message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Admin access required")]
    AdminRequired,

    #[error("Payment not found")]
    PaymentNotFound,

    #[error("Can only refund completed payments")]
    RefundNotCompleted,

    #[error("Refund amount cannot exceed payment amount")]
    RefundExceedsAmount,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Service unavailable")]
    Upstream(#[from] reqwest::Error),

    #[error("Internal server error")]
    InternalError,
}

impl From<crate::services::auth_service::AuthServiceError> for ApiError {
    fn from(err: crate::services::auth_service::AuthServiceError) -> Self {
        use crate::services::auth_service::AuthServiceError as E;
        match err {
            E::UserAlreadyExists => ApiError::UserAlreadyExists,
            E::InvalidCredentials => ApiError::InvalidCredentials,
            E::InvalidToken => ApiError::InvalidToken,
            E::InvalidEmail | E::WeakPassword => ApiError::Validation(err.to_string()),
            E::HashingError(msg) | E::TokenError(msg) => {
                tracing::error!("auth service failure: {}", msg);
                ApiError::InternalError
            }
            E::RepositoryError(e) => repository_error(e),
        }
    }
}

impl From<crate::services::user_service::UserServiceError> for ApiError {
    fn from(err: crate::services::user_service::UserServiceError) -> Self {
        use crate::services::user_service::UserServiceError as E;
        match err {
            E::ProfileNotFound => ApiError::ProfileNotFound,
            E::RepositoryError(e) => repository_error(e),
        }
    }
}

impl From<crate::services::payment_service::PaymentServiceError> for ApiError {
    fn from(err: crate::services::payment_service::PaymentServiceError) -> Self {
        use crate::services::payment_service::PaymentServiceError as E;
        match err {
            E::PaymentNotFound => ApiError::PaymentNotFound,
            E::RefundNotCompleted => ApiError::RefundNotCompleted,
            E::RefundExceedsAmount => ApiError::RefundExceedsAmount,
            E::Validation(msg) => ApiError::Validation(msg),
            E::RepositoryError(e) => repository_error(e),
        }
    }
}

impl From<crate::services::order_service::OrderServiceError> for ApiError {
    fn from(err: crate::services::order_service::OrderServiceError) -> Self {
        use crate::services::order_service::OrderServiceError as E;
        match err {
            E::OrderNotFound => ApiError::OrderNotFound,
            E::Validation(msg) => ApiError::Validation(msg),
            E::RepositoryError(e) => repository_error(e),
        }
    }
}

fn repository_error(err: crate::repositories::RepositoryError) -> ApiError {
    use crate::repositories::RepositoryError as E;
    match err {
        E::Database(e) => ApiError::Database(e),
        E::NotFound | E::AlreadyExists | E::Serialization(_) => {
            tracing::error!("unexpected repository error: {}", err);
            ApiError::InternalError
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UserAlreadyExists
            | ApiError::InvalidCredentials
            | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::AdminRequired => StatusCode::FORBIDDEN,
            ApiError::PaymentNotFound | ApiError::OrderNotFound | ApiError::ProfileNotFound => {
                StatusCode::NOT_FOUND
            }
            ApiError::RefundNotCompleted
            | ApiError::RefundExceedsAmount
            | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) | ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal failure details stay in the logs, not the response
        let message = match &self {
            ApiError::Database(e) => {
                tracing::error!("database error: {}", e);
                "Internal server error".to_string()
            }
            ApiError::Upstream(e) => {
                tracing::error!("upstream request failed: {}", e);
                "Service unavailable".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
