use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::ApiResponse;
use crate::services::auth_service::{AuthService, LoginRequest, RegisterRequest};

#[derive(Clone)]
pub struct AuthState {
    pub auth_service: Arc<AuthService>,
}

pub fn router(state: AuthState) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/validate", post(validate))
        .with_state(state)
}

async fn register(
    State(state): State<AuthState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let payload = state.auth_service.register(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            "User registered successfully",
            payload,
        )),
    ))
}

async fn login(
    State(state): State<AuthState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let payload = state.auth_service.login(request).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Login successful",
        payload,
    )))
}

#[derive(Debug, Deserialize)]
struct ValidateRequest {
    token: String,
}

async fn validate(
    State(state): State<AuthState>,
    Json(request): Json<ValidateRequest>,
) -> Result<impl IntoResponse> {
    let claims = state.auth_service.validate_token(&request.token)?;
    Ok(Json(ApiResponse::ok(claims)))
}
