use serde::{Deserialize, Serialize};

/// Profile payload pushed from the auth store to the user service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncProfileRequest {
    pub user_id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileSyncError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("User service rejected sync: {0}")]
    Rejected(reqwest::StatusCode),
}

/// HTTP client for `POST /users/sync` on the user service. Callers treat
/// failures as best-effort: registration succeeds even when sync does not.
#[derive(Clone)]
pub struct ProfileSyncClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProfileSyncClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn sync(&self, profile: &SyncProfileRequest) -> Result<(), ProfileSyncError> {
        let url = format!("{}/users/sync", self.base_url);
        let response = self.client.post(&url).json(profile).send().await?;

        if !response.status().is_success() {
            return Err(ProfileSyncError::Rejected(response.status()));
        }

        Ok(())
    }
}
