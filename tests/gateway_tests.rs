use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header as request_header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopfront::config::ServiceUrls;
use shopfront::gateway::{router, GatewayState};

fn urls_with_auth(auth: String) -> ServiceUrls {
    ServiceUrls {
        auth,
        // Unroutable; tests that hit these expect a 502
        users: "http://127.0.0.1:1".to_string(),
        payments: "http://127.0.0.1:1".to_string(),
        orders: "http://127.0.0.1:1".to_string(),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_gateway_relays_body_and_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(serde_json::json!({
            "email": "user@example.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Login successful",
            "data": { "token": "jwt-goes-here" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let app = router(GatewayState::new(urls_with_auth(mock_server.uri())));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "email": "user@example.com",
                        "password": "password123"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["token"], "jwt-goes-here");
}

#[tokio::test]
async fn test_gateway_relays_error_status_unchanged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "success": false,
            "message": "Invalid credentials"
        })))
        .mount(&mock_server)
        .await;

    let app = router(GatewayState::new(urls_with_auth(mock_server.uri())));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_gateway_forwards_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/admin"))
        .and(request_header("authorization", "Bearer admin-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let urls = ServiceUrls {
        auth: "http://127.0.0.1:1".to_string(),
        users: "http://127.0.0.1:1".to_string(),
        payments: "http://127.0.0.1:1".to_string(),
        orders: mock_server.uri(),
    };
    let app = router(GatewayState::new(urls));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/orders/admin")
                .header(header::AUTHORIZATION, "Bearer admin-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_gateway_maps_unreachable_service_to_502() {
    let app = router(GatewayState::new(urls_with_auth(
        "http://127.0.0.1:1".to_string(),
    )));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Service unavailable");
}
