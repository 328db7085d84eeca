use std::sync::Arc;

use crate::models::UserProfile;
use crate::repositories::{ProfileRepository, RepositoryError};
use crate::services::profile_sync::SyncProfileRequest;

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("Profile not found")]
    ProfileNotFound,
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

/// Profile store behind `/users/*`. Records arrive via sync from the auth
/// service and are never authoritative for authentication.
pub struct UserService {
    profiles: Arc<dyn ProfileRepository>,
}

impl UserService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn sync_profile(
        &self,
        request: SyncProfileRequest,
    ) -> Result<UserProfile, UserServiceError> {
        let profile = self
            .profiles
            .upsert(request.user_id, &request.email, &request.name, &request.role)
            .await?;
        Ok(profile)
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<UserProfile, UserServiceError> {
        self.profiles
            .find_by_id(user_id)
            .await?
            .ok_or(UserServiceError::ProfileNotFound)
    }
}
