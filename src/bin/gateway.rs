use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use shopfront::config;
use shopfront::gateway::{self, GatewayState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    shopfront::init_tracing();

    let urls = config::ServiceUrls::from_env();
    tracing::info!(
        auth = %urls.auth,
        users = %urls.users,
        payments = %urls.payments,
        orders = %urls.orders,
        "gateway routing table"
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ]);

    let app = gateway::router(GatewayState::new(urls))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    shopfront::serve(app, config::listen_addr(8080)?).await
}
