pub mod session;

use std::env;
use std::net::SocketAddr;

/// Base URLs of the backend services, as seen from the gateway (and from the
/// auth service for profile sync). Defaults match local development ports.
#[derive(Debug, Clone)]
pub struct ServiceUrls {
    pub auth: String,
    pub users: String,
    pub payments: String,
    pub orders: String,
}

impl ServiceUrls {
    pub fn from_env() -> Self {
        Self {
            auth: env_url("AUTH_SERVICE_URL", 3011),
            users: env_url("USER_SERVICE_URL", 3012),
            payments: env_url("PAYMENT_SERVICE_URL", 3013),
            orders: env_url("ORDER_SERVICE_URL", 3014),
        }
    }
}

fn env_url(key: &str, default_port: u16) -> String {
    env::var(key).unwrap_or_else(|_| format!("http://127.0.0.1:{}", default_port))
}

/// Listen address for a service: HOST plus PORT, falling back to the
/// service's conventional port.
pub fn listen_addr(default_port: u16) -> anyhow::Result<SocketAddr> {
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = match env::var("PORT") {
        Ok(p) => p.parse::<u16>()?,
        Err(_) => default_port,
    };
    Ok(SocketAddr::from((host.parse::<std::net::IpAddr>()?, port)))
}

/// Per-service database URL, e.g. `AUTH_DATABASE_URL`. Falls back to a file
/// under ./data so the services can run without any configuration.
pub fn database_url(key: &str, default_file: &str) -> String {
    env::var(key).unwrap_or_else(|_| format!("sqlite://data/{}?mode=rwc", default_file))
}

/// Shared secret for signing and verifying JWTs. The auth service signs with
/// it; the order service verifies with it.
pub fn jwt_secret() -> String {
    match env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            tracing::warn!("JWT_SECRET not set; using development default");
            "shopfront-dev-secret".to_string()
        }
    }
}

/// Base URL of the gateway, as seen from the web frontend.
pub fn gateway_url() -> String {
    env::var("GATEWAY_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string())
}
