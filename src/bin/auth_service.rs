use std::sync::Arc;

use tower_http::trace::TraceLayer;

use shopfront::auth::TokenService;
use shopfront::handlers::auth_handlers::{self, AuthState};
use shopfront::repositories::SqliteUserRepository;
use shopfront::services::{AuthService, ProfileSyncClient};
use shopfront::{config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    shopfront::init_tracing();

    let database_url = config::database_url("AUTH_DATABASE_URL", "auth.db");
    let pool = db::create_pool(&database_url).await?;
    sqlx::migrate!("./migrations/auth").run(&pool).await?;

    let users = Arc::new(SqliteUserRepository::new(pool));
    let tokens = TokenService::new(&config::jwt_secret());
    let profile_sync = ProfileSyncClient::new(config::ServiceUrls::from_env().users);
    let auth_service = Arc::new(AuthService::new(users, tokens, Some(profile_sync)));

    let app = auth_handlers::router(AuthState { auth_service }).layer(TraceLayer::new_for_http());

    shopfront::serve(app, config::listen_addr(3011)?).await
}
