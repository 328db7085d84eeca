use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::ApiResponse;
use crate::services::payment_service::{PaymentService, ProcessPaymentRequest};

#[derive(Clone)]
pub struct PaymentState {
    pub payment_service: Arc<PaymentService>,
}

pub fn router(state: PaymentState) -> Router {
    Router::new()
        .route("/payments/process", post(process_payment))
        .route("/payments/order/{order_id}", get(payment_status))
        .route("/payments/{id}/refund", post(refund_payment))
        .with_state(state)
}

async fn process_payment(
    State(state): State<PaymentState>,
    Json(request): Json<ProcessPaymentRequest>,
) -> Result<impl IntoResponse> {
    let outcome = state.payment_service.process(request).await?;

    // A declined draw still persists the attempt; the envelope carries the
    // failed record with success=false
    let response = if outcome.approved {
        ApiResponse::ok_with_message("Payment processed successfully", outcome.payment)
    } else {
        ApiResponse::failed("Payment processing failed", outcome.payment)
    };

    Ok((StatusCode::CREATED, Json(response)))
}

async fn payment_status(
    State(state): State<PaymentState>,
    Path(order_id): Path<i64>,
) -> Result<impl IntoResponse> {
    let payment = state.payment_service.status_for_order(order_id).await?;
    Ok(Json(ApiResponse::ok(payment)))
}

#[derive(Debug, Deserialize)]
struct RefundRequest {
    amount: i64,
}

async fn refund_payment(
    State(state): State<PaymentState>,
    Path(id): Path<i64>,
    Json(request): Json<RefundRequest>,
) -> Result<impl IntoResponse> {
    let receipt = state.payment_service.refund(id, request.amount).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Refund processed successfully",
        receipt,
    )))
}
