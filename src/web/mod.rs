pub mod client;
pub mod pages;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use tower_sessions::Session;

use client::GatewayClient;

#[derive(Clone)]
pub struct WebState {
    pub gateway: GatewayClient,
}

/// Router for the server-rendered frontend. Pages talk to the backend
/// services through the gateway; the session holds the JWT between requests.
pub fn router(state: WebState) -> Router {
    let protected = Router::new()
        .route("/checkout", get(pages::checkout_page).post(pages::submit_checkout))
        .route("/orders", get(pages::orders_page))
        .route("/admin/orders", get(pages::admin_orders_page))
        .route("/admin/orders/{id}/delete", post(pages::admin_delete_order))
        .layer(middleware::from_fn(require_login));

    Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/products", get(pages::products_page))
        .route("/login", get(pages::login_page).post(pages::submit_login))
        .route("/register", get(pages::register_page).post(pages::submit_register))
        .route("/logout", get(pages::logout))
        .merge(protected)
        .with_state(state)
}

/// Redirect to the login page unless the session carries a token.
pub async fn require_login(session: Session, request: Request, next: Next) -> Response {
    if let Ok(Some(_token)) = session.get::<String>("token").await {
        next.run(request).await
    } else {
        Redirect::to("/login").into_response()
    }
}
