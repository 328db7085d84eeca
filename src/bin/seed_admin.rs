use std::sync::Arc;

use shopfront::auth::TokenService;
use shopfront::models::Role;
use shopfront::repositories::{SqliteUserRepository, UserRepository};
use shopfront::services::{AuthService, ProfileSyncClient};
use shopfront::{config, db};

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "admin123";

/// One-shot seeding of the admin account, mirrored into the user service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    shopfront::init_tracing();

    let database_url = config::database_url("AUTH_DATABASE_URL", "auth.db");
    let pool = db::create_pool(&database_url).await?;
    sqlx::migrate!("./migrations/auth").run(&pool).await?;

    let users: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool));
    let profile_sync = ProfileSyncClient::new(config::ServiceUrls::from_env().users);
    let auth_service = AuthService::new(
        users.clone(),
        TokenService::new(&config::jwt_secret()),
        Some(profile_sync),
    );

    let admin = match users.find_by_email(ADMIN_EMAIL).await? {
        Some(existing) => {
            tracing::info!(id = existing.id, "admin user already exists");
            existing
        }
        None => {
            let password_hash = auth_service
                .hash_password(ADMIN_PASSWORD)
                .map_err(|e| anyhow::anyhow!("hashing admin password failed: {}", e))?;
            let admin = users
                .create_user(ADMIN_EMAIL, &password_hash, "Admin User", Role::Admin)
                .await?;
            tracing::info!(id = admin.id, email = ADMIN_EMAIL, "admin user created");
            tracing::warn!("change the default admin password before production use");
            admin
        }
    };

    // Best-effort, same as registration: seeding succeeds even if the user
    // service is down
    tracing::info!("syncing admin profile to user service");
    auth_service.sync_profile(&admin).await;

    Ok(())
}
