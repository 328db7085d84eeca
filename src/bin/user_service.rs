use std::sync::Arc;

use tower_http::trace::TraceLayer;

use shopfront::handlers::user_handlers::{self, UserState};
use shopfront::repositories::SqliteProfileRepository;
use shopfront::services::UserService;
use shopfront::{config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    shopfront::init_tracing();

    let database_url = config::database_url("USER_DATABASE_URL", "users.db");
    let pool = db::create_pool(&database_url).await?;
    sqlx::migrate!("./migrations/users").run(&pool).await?;

    let profiles = Arc::new(SqliteProfileRepository::new(pool));
    let user_service = Arc::new(UserService::new(profiles));

    let app = user_handlers::router(UserState { user_service }).layer(TraceLayer::new_for_http());

    shopfront::serve(app, config::listen_addr(3012)?).await
}
