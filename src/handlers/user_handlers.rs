use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::models::ApiResponse;
use crate::services::profile_sync::SyncProfileRequest;
use crate::services::user_service::UserService;

#[derive(Clone)]
pub struct UserState {
    pub user_service: Arc<UserService>,
}

pub fn router(state: UserState) -> Router {
    Router::new()
        .route("/users/sync", post(sync_profile))
        .route("/users/{id}", get(get_profile))
        .with_state(state)
}

async fn sync_profile(
    State(state): State<UserState>,
    Json(request): Json<SyncProfileRequest>,
) -> Result<impl IntoResponse> {
    let profile = state.user_service.sync_profile(request).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Profile synced successfully",
        profile,
    )))
}

async fn get_profile(
    State(state): State<UserState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let profile = state.user_service.get_profile(id).await?;
    Ok(Json(ApiResponse::ok(profile)))
}
