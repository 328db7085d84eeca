use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::{Payment, PaymentStatus};
use crate::repositories::payment_repository::NewPayment;
use crate::repositories::{PaymentRepository, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum PaymentServiceError {
    #[error("Payment not found")]
    PaymentNotFound,
    #[error("Can only refund completed payments")]
    RefundNotCompleted,
    #[error("Refund amount cannot exceed payment amount")]
    RefundExceedsAmount,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

#[derive(Debug, Deserialize)]
pub struct ProcessPaymentRequest {
    pub order_id: i64,
    pub amount: i64,
    pub payment_method: String,
    pub card_last4: Option<String>,
}

/// Result of a payment attempt. The record is persisted either way; `approved`
/// mirrors the simulated gateway draw.
#[derive(Debug, Serialize)]
pub struct PaymentOutcome {
    pub payment: Payment,
    pub approved: bool,
}

#[derive(Debug, Serialize)]
pub struct RefundReceipt {
    pub payment_id: i64,
    pub refund_amount: i64,
    pub refund_transaction_id: String,
}

/// Simulated payment processor. A real deployment would integrate a gateway
/// like Stripe here; this one draws success with a fixed probability.
pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    success_rate: f64,
}

impl PaymentService {
    const DEFAULT_SUCCESS_RATE: f64 = 0.9;

    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self {
            payments,
            success_rate: Self::DEFAULT_SUCCESS_RATE,
        }
    }

    /// Pin the simulated gateway outcome; used by tests (0.0 or 1.0).
    pub fn with_success_rate(mut self, success_rate: f64) -> Self {
        self.success_rate = success_rate;
        self
    }

    pub async fn process(
        &self,
        request: ProcessPaymentRequest,
    ) -> Result<PaymentOutcome, PaymentServiceError> {
        if request.amount <= 0 {
            return Err(PaymentServiceError::Validation(
                "Amount must be greater than zero".to_string(),
            ));
        }

        let approved = rand::thread_rng().gen::<f64>() < self.success_rate;
        let transaction_id = transaction_id("TXN");

        let payment = self
            .payments
            .create(NewPayment {
                order_id: request.order_id,
                amount: request.amount,
                payment_method: request.payment_method,
                transaction_id,
                status: if approved {
                    PaymentStatus::Completed
                } else {
                    PaymentStatus::Failed
                },
                card_last4: request.card_last4.unwrap_or_else(|| "****".to_string()),
            })
            .await?;

        Ok(PaymentOutcome { payment, approved })
    }

    pub async fn status_for_order(&self, order_id: i64) -> Result<Payment, PaymentServiceError> {
        self.payments
            .latest_for_order(order_id)
            .await?
            .ok_or(PaymentServiceError::PaymentNotFound)
    }

    pub async fn refund(
        &self,
        payment_id: i64,
        amount: i64,
    ) -> Result<RefundReceipt, PaymentServiceError> {
        let payment = self
            .payments
            .find_by_id(payment_id)
            .await?
            .ok_or(PaymentServiceError::PaymentNotFound)?;

        if payment.status != PaymentStatus::Completed {
            return Err(PaymentServiceError::RefundNotCompleted);
        }

        if amount > payment.amount {
            return Err(PaymentServiceError::RefundExceedsAmount);
        }

        let refund_transaction_id = transaction_id("REF");
        self.payments
            .mark_refunded(payment_id, amount, &refund_transaction_id)
            .await?;

        Ok(RefundReceipt {
            payment_id,
            refund_amount: amount,
            refund_transaction_id,
        })
    }
}

/// `TXN-<millis>-<suffix>` / `REF-<millis>-<suffix>`, matching the receipt
/// format customers see.
fn transaction_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, millis, &suffix[..9])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_id_has_prefix_and_suffix() {
        let id = transaction_id("TXN");
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts[0], "TXN");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }
}
