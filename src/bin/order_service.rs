use std::sync::Arc;

use tower_http::trace::TraceLayer;

use shopfront::auth::TokenService;
use shopfront::handlers::order_handlers::{self, OrderState};
use shopfront::repositories::SqliteOrderRepository;
use shopfront::services::OrderService;
use shopfront::{config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    shopfront::init_tracing();

    let database_url = config::database_url("ORDER_DATABASE_URL", "orders.db");
    let pool = db::create_pool(&database_url).await?;
    sqlx::migrate!("./migrations/orders").run(&pool).await?;

    let orders = Arc::new(SqliteOrderRepository::new(pool));
    let order_service = Arc::new(OrderService::new(orders));
    let token_service = TokenService::new(&config::jwt_secret());

    let app = order_handlers::router(OrderState {
        order_service,
        token_service,
    })
    .layer(TraceLayer::new_for_http());

    shopfront::serve(app, config::listen_addr(3014)?).await
}
