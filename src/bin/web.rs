use tower_http::{services::ServeDir, trace::TraceLayer};
use tower_sessions_sqlx_store::SqliteStore;

use shopfront::config::{self, session::SessionConfig};
use shopfront::web::{self, client::GatewayClient, WebState};
use shopfront::db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    shopfront::init_tracing();

    // Session store lives in its own database, separate from the services
    let database_url = config::database_url("WEB_DATABASE_URL", "web.db");
    let pool = db::create_pool(&database_url).await?;

    let session_store = SqliteStore::new(pool)
        .with_table_name("sessions")
        .map_err(|e| anyhow::anyhow!("invalid session table name: {}", e))?;
    session_store.migrate().await?;
    let session_layer = SessionConfig::from_env().create_layer(session_store);

    let state = WebState {
        gateway: GatewayClient::new(config::gateway_url()),
    };

    let app = web::router(state)
        .nest_service("/static", ServeDir::new("static"))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http());

    shopfront::serve(app, config::listen_addr(3000)?).await
}
