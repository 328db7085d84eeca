pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod web;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use std::net::SocketAddr;

/// Initialize tracing for a service binary. The filter defaults to debug
/// output for this crate plus tower-http request traces.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shopfront=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Bind and serve a router. Shared by all service binaries.
pub async fn serve(app: axum::Router, addr: SocketAddr) -> anyhow::Result<()> {
    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
