use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::auth::middleware::{require_admin, require_jwt};
use crate::auth::{Claims, TokenService};
use crate::error::{ApiError, Result};
use crate::models::ApiResponse;
use crate::services::order_service::{CreateOrderRequest, OrderService};

#[derive(Clone)]
pub struct OrderState {
    pub order_service: Arc<OrderService>,
    pub token_service: TokenService,
}

pub fn router(state: OrderState) -> Router {
    let admin_routes = Router::new()
        .route("/orders/admin", get(list_all_orders))
        .route("/orders/{id}", delete(delete_order))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/orders", post(create_order).get(list_my_orders))
        .route("/orders/{id}/payment", patch(record_payment))
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            state.token_service.clone(),
            require_jwt,
        ))
        .with_state(state)
}

fn claims_user_id(claims: &Claims) -> Result<i64> {
    claims.user_id().ok_or(ApiError::InvalidToken)
}

async fn create_order(
    State(state): State<OrderState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse> {
    let user_id = claims_user_id(&claims)?;
    let order = state.order_service.create_order(user_id, request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            "Order created successfully",
            order,
        )),
    ))
}

async fn list_my_orders(
    State(state): State<OrderState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims_user_id(&claims)?;
    let orders = state.order_service.orders_for_user(user_id).await?;
    Ok(Json(ApiResponse::ok(orders)))
}

async fn list_all_orders(State(state): State<OrderState>) -> Result<impl IntoResponse> {
    let orders = state.order_service.all_orders().await?;
    Ok(Json(ApiResponse::ok(orders)))
}

async fn delete_order(
    State(state): State<OrderState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    state.order_service.delete_order(id).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Order deleted successfully",
        serde_json::json!({ "id": id }),
    )))
}

#[derive(Debug, Deserialize)]
struct RecordPaymentRequest {
    paid: bool,
}

async fn record_payment(
    State(state): State<OrderState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<impl IntoResponse> {
    let user_id = claims_user_id(&claims)?;

    // Customers can only touch their own orders; admins can touch any
    let order = state.order_service.get_order(id).await?;
    if order.user_id != user_id && !claims.role.is_admin() {
        return Err(ApiError::OrderNotFound);
    }

    let order = state.order_service.record_payment(id, request.paid).await?;
    Ok(Json(ApiResponse::ok(order)))
}
