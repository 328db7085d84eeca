use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

use super::{RepositoryError, RepositoryResult};
use crate::models::{Payment, PaymentStatus};

/// Fields for a freshly processed payment attempt.
pub struct NewPayment {
    pub order_id: i64,
    pub amount: i64,
    pub payment_method: String,
    pub transaction_id: String,
    pub status: PaymentStatus,
    pub card_last4: String,
}

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: NewPayment) -> RepositoryResult<Payment>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Payment>>;
    /// Most recent payment attempt for an order.
    async fn latest_for_order(&self, order_id: i64) -> RepositoryResult<Option<Payment>>;
    async fn mark_refunded(
        &self,
        id: i64,
        refund_amount: i64,
        refund_transaction_id: &str,
    ) -> RepositoryResult<()>;
}

#[derive(FromRow)]
struct PaymentRow {
    id: i64,
    order_id: i64,
    amount: i64,
    payment_method: String,
    transaction_id: String,
    status: String,
    card_last4: String,
    refund_amount: Option<i64>,
    refund_transaction_id: Option<String>,
    created_at: Option<String>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Payment {
            id: row.id,
            order_id: row.order_id,
            amount: row.amount,
            payment_method: row.payment_method,
            transaction_id: row.transaction_id,
            status: PaymentStatus::parse(&row.status),
            card_last4: row.card_last4,
            refund_amount: row.refund_amount,
            refund_transaction_id: row.refund_transaction_id,
            created_at: row.created_at,
        }
    }
}

pub struct SqlitePaymentRepository {
    pool: SqlitePool,
}

impl SqlitePaymentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const SELECT_PAYMENT: &str = "SELECT id, order_id, amount, payment_method, transaction_id, \
     status, card_last4, refund_amount, refund_transaction_id, created_at FROM payments";

#[async_trait]
impl PaymentRepository for SqlitePaymentRepository {
    async fn create(&self, payment: NewPayment) -> RepositoryResult<Payment> {
        let result = sqlx::query(
            "INSERT INTO payments (order_id, amount, payment_method, transaction_id, status, card_last4) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(payment.order_id)
        .bind(payment.amount)
        .bind(&payment.payment_method)
        .bind(&payment.transaction_id)
        .bind(payment.status.as_str())
        .bind(&payment.card_last4)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!("{} WHERE id = ?", SELECT_PAYMENT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Payment::from))
    }

    async fn latest_for_order(&self, order_id: i64) -> RepositoryResult<Option<Payment>> {
        let row = sqlx::query_as::<_, PaymentRow>(&format!(
            "{} WHERE order_id = ? ORDER BY id DESC LIMIT 1",
            SELECT_PAYMENT
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Payment::from))
    }

    async fn mark_refunded(
        &self,
        id: i64,
        refund_amount: i64,
        refund_transaction_id: &str,
    ) -> RepositoryResult<()> {
        let result = sqlx::query(
            "UPDATE payments SET status = 'refunded', refund_amount = ?, \
             refund_transaction_id = ? WHERE id = ?",
        )
        .bind(refund_amount)
        .bind(refund_transaction_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
