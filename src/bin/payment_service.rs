use std::sync::Arc;

use tower_http::trace::TraceLayer;

use shopfront::handlers::payment_handlers::{self, PaymentState};
use shopfront::repositories::SqlitePaymentRepository;
use shopfront::services::PaymentService;
use shopfront::{config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    shopfront::init_tracing();

    let database_url = config::database_url("PAYMENT_DATABASE_URL", "payments.db");
    let pool = db::create_pool(&database_url).await?;
    sqlx::migrate!("./migrations/payments").run(&pool).await?;

    let payments = Arc::new(SqlitePaymentRepository::new(pool));
    let payment_service = Arc::new(PaymentService::new(payments));

    let app =
        payment_handlers::router(PaymentState { payment_service }).layer(TraceLayer::new_for_http());

    shopfront::serve(app, config::listen_addr(3013)?).await
}
