use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};

use crate::config::ServiceUrls;
use crate::error::ApiError;

/// Maximum request body the gateway will buffer before forwarding.
const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone)]
pub struct GatewayState {
    client: reqwest::Client,
    urls: ServiceUrls,
}

impl GatewayState {
    pub fn new(urls: ServiceUrls) -> Self {
        Self {
            client: reqwest::Client::new(),
            urls,
        }
    }
}

/// The gateway owns no business logic: it forwards method, path, body and the
/// Authorization header to the service that owns the path prefix, and relays
/// the downstream status and JSON body unchanged.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/auth/{*path}", any(forward_auth))
        .route("/users/{*path}", any(forward_users))
        .route("/payments/{*path}", any(forward_payments))
        .route("/orders", any(forward_orders))
        .route("/orders/{*path}", any(forward_orders))
        .with_state(state)
}

async fn forward_auth(State(state): State<GatewayState>, request: Request) -> Response {
    forward(&state, state.urls.auth.clone(), request).await
}

async fn forward_users(State(state): State<GatewayState>, request: Request) -> Response {
    forward(&state, state.urls.users.clone(), request).await
}

async fn forward_payments(State(state): State<GatewayState>, request: Request) -> Response {
    forward(&state, state.urls.payments.clone(), request).await
}

async fn forward_orders(State(state): State<GatewayState>, request: Request) -> Response {
    forward(&state, state.urls.orders.clone(), request).await
}

async fn forward(state: &GatewayState, base_url: String, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());
    let url = format!("{}{}", base_url, path_and_query);

    let body_bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return ApiError::Validation("Request body too large".to_string()).into_response()
        }
    };

    let method = match reqwest::Method::from_bytes(parts.method.as_str().as_bytes()) {
        Ok(method) => method,
        Err(_) => return StatusCode::METHOD_NOT_ALLOWED.into_response(),
    };

    let mut upstream = state.client.request(method, &url);

    if let Some(auth) = parts.headers.get(header::AUTHORIZATION) {
        if let Ok(value) = auth.to_str() {
            upstream = upstream.header(header::AUTHORIZATION, value);
        }
    }
    if !body_bytes.is_empty() {
        upstream = upstream
            .header(header::CONTENT_TYPE, "application/json")
            .body(body_bytes.to_vec());
    }

    tracing::debug!(%url, "forwarding request");

    let downstream = match upstream.send().await {
        Ok(response) => response,
        Err(e) => return ApiError::Upstream(e).into_response(),
    };

    relay(downstream).await
}

async fn relay(downstream: reqwest::Response) -> Response {
    let status =
        StatusCode::from_u16(downstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);

    let body = match downstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => return ApiError::Upstream(e).into_response(),
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
