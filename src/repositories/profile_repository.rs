use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{RepositoryError, RepositoryResult};
use crate::models::UserProfile;

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    /// Insert or replace the profile for a user id. Idempotent.
    async fn upsert(
        &self,
        user_id: i64,
        email: &str,
        name: &str,
        role: &str,
    ) -> RepositoryResult<UserProfile>;
    async fn find_by_id(&self, user_id: i64) -> RepositoryResult<Option<UserProfile>>;
}

pub struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn upsert(
        &self,
        user_id: i64,
        email: &str,
        name: &str,
        role: &str,
    ) -> RepositoryResult<UserProfile> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, email, name, role, synced_at)
            VALUES (?, ?, ?, ?, datetime('now'))
            ON CONFLICT(user_id) DO UPDATE SET
                email = excluded.email,
                name = excluded.name,
                role = excluded.role,
                synced_at = excluded.synced_at
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(name)
        .bind(role)
        .execute(&self.pool)
        .await?;

        self.find_by_id(user_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_id(&self, user_id: i64) -> RepositoryResult<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            "SELECT user_id, email, name, role, synced_at FROM profiles WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
