use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use shopfront::auth::TokenService;
use shopfront::handlers::order_handlers::{router, OrderState};
use shopfront::models::{Role, User};
use shopfront::repositories::SqliteOrderRepository;
use shopfront::services::OrderService;
use shopfront::test_utils::test_helpers;

const SECRET: &str = "handler-test-secret";

async fn app() -> axum::Router {
    let pool = test_helpers::create_order_db().await.unwrap();
    let order_service = Arc::new(OrderService::new(Arc::new(SqliteOrderRepository::new(pool))));
    router(OrderState {
        order_service,
        token_service: TokenService::new(SECRET),
    })
}

fn token_for(id: i64, role: Role) -> String {
    let user = User {
        id,
        email: format!("user{}@example.com", id),
        password_hash: String::new(),
        name: "Handler Test".to_string(),
        role,
        created_at: None,
    };
    TokenService::new(SECRET).sign(&user).unwrap()
}

fn order_body() -> String {
    serde_json::json!({
        "items": [
            { "product_id": "p1", "product_name": "Widget", "price": 1000, "quantity": 2 }
        ]
    })
    .to_string()
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_orders_require_token() {
    let app = app().await;

    let response = app
        .oneshot(request("GET", "/orders", None, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_orders_reject_bad_token() {
    let app = app().await;

    let response = app
        .oneshot(request("GET", "/orders", Some("garbage"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_then_list_own_orders() {
    let app = app().await;
    let token = token_for(7, Role::Customer);

    let response = app
        .clone()
        .oneshot(request("POST", "/orders", Some(&token), Some(order_body())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["user_id"], 7);
    assert_eq!(created["data"]["total_amount"], 2000);

    let response = app
        .oneshot(request("GET", "/orders", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_listing_excludes_other_users() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/orders",
            Some(&token_for(1, Role::Customer)),
            Some(order_body()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(request(
            "GET",
            "/orders",
            Some(&token_for(2, Role::Customer)),
            None,
        ))
        .await
        .unwrap();

    let listed = body_json(response).await;
    assert_eq!(listed["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_admin_listing_requires_admin_role() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            "/orders/admin",
            Some(&token_for(1, Role::Customer)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .oneshot(request(
            "GET",
            "/orders/admin",
            Some(&token_for(1, Role::Admin)),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_delete_order() {
    let app = app().await;
    let customer = token_for(3, Role::Customer);
    let admin = token_for(99, Role::Admin);

    let response = app
        .clone()
        .oneshot(request("POST", "/orders", Some(&customer), Some(order_body())))
        .await
        .unwrap();
    let created = body_json(response).await;
    let order_id = created["data"]["id"].as_i64().unwrap();

    // Customers cannot delete, even their own orders
    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/orders/{}", order_id),
            Some(&customer),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .clone()
        .oneshot(request(
            "DELETE",
            &format!("/orders/{}", order_id),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting again reports not found
    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/orders/{}", order_id),
            Some(&admin),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_order_rejects_empty_items() {
    let app = app().await;
    let token = token_for(5, Role::Customer);

    let response = app
        .oneshot(request(
            "POST",
            "/orders",
            Some(&token),
            Some(serde_json::json!({ "items": [] }).to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_record_payment_marks_order_paid() {
    let app = app().await;
    let token = token_for(11, Role::Customer);

    let response = app
        .clone()
        .oneshot(request("POST", "/orders", Some(&token), Some(order_body())))
        .await
        .unwrap();
    let created = body_json(response).await;
    let order_id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(request(
            "PATCH",
            &format!("/orders/{}/payment", order_id),
            Some(&token),
            Some(serde_json::json!({ "paid": true }).to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["data"]["payment_status"], "paid");
    assert_eq!(updated["data"]["status"], "processing");
}

#[tokio::test]
async fn test_record_payment_rejects_foreign_order() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/orders",
            Some(&token_for(1, Role::Customer)),
            Some(order_body()),
        ))
        .await
        .unwrap();
    let created = body_json(response).await;
    let order_id = created["data"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(request(
            "PATCH",
            &format!("/orders/{}/payment", order_id),
            Some(&token_for(2, Role::Customer)),
            Some(serde_json::json!({ "paid": true }).to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
