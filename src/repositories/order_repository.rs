use async_trait::async_trait;
use sqlx::{FromRow, SqlitePool};

use super::{RepositoryError, RepositoryResult};
use crate::models::{Order, OrderItem, OrderStatus, PaymentState};

pub struct NewOrder {
    pub order_number: String,
    pub user_id: i64,
    pub items: Vec<OrderItem>,
    pub total_amount: i64,
}

#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: NewOrder) -> RepositoryResult<Order>;
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Order>>;
    async fn list_for_user(&self, user_id: i64) -> RepositoryResult<Vec<Order>>;
    async fn list_all(&self) -> RepositoryResult<Vec<Order>>;
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
    async fn set_payment_state(
        &self,
        id: i64,
        payment_status: PaymentState,
        status: OrderStatus,
    ) -> RepositoryResult<()>;
}

#[derive(FromRow)]
struct OrderRow {
    id: i64,
    order_number: String,
    user_id: i64,
    items: String,
    total_amount: i64,
    status: String,
    payment_status: String,
    created_at: Option<String>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        // A row that fails to parse keeps an empty item list rather than
        // poisoning the whole listing
        let items: Vec<OrderItem> = serde_json::from_str(&row.items).unwrap_or_default();
        Order {
            id: row.id,
            order_number: row.order_number,
            user_id: row.user_id,
            items,
            total_amount: row.total_amount,
            status: OrderStatus::parse(&row.status),
            payment_status: PaymentState::parse(&row.payment_status),
            created_at: row.created_at,
        }
    }
}

pub struct SqliteOrderRepository {
    pool: SqlitePool,
}

impl SqliteOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const SELECT_ORDER: &str = "SELECT id, order_number, user_id, items, total_amount, \
     status, payment_status, created_at FROM orders";

#[async_trait]
impl OrderRepository for SqliteOrderRepository {
    async fn create(&self, order: NewOrder) -> RepositoryResult<Order> {
        let items_json = serde_json::to_string(&order.items)?;

        let result = sqlx::query(
            "INSERT INTO orders (order_number, user_id, items, total_amount) VALUES (?, ?, ?, ?)",
        )
        .bind(&order.order_number)
        .bind(order.user_id)
        .bind(&items_json)
        .bind(order.total_amount)
        .execute(&self.pool)
        .await;

        match result {
            Ok(res) => {
                let id = res.last_insert_rowid();
                self.find_by_id(id).await?.ok_or(RepositoryError::NotFound)
            }
            Err(e) => {
                if e.to_string().contains("UNIQUE") {
                    Err(RepositoryError::AlreadyExists)
                } else {
                    Err(RepositoryError::Database(e))
                }
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{} WHERE id = ?", SELECT_ORDER))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Order::from))
    }

    async fn list_for_user(&self, user_id: i64) -> RepositoryResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "{} WHERE user_id = ? ORDER BY id DESC",
            SELECT_ORDER
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!("{} ORDER BY id DESC", SELECT_ORDER))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn set_payment_state(
        &self,
        id: i64,
        payment_status: PaymentState,
        status: OrderStatus,
    ) -> RepositoryResult<()> {
        let result = sqlx::query("UPDATE orders SET payment_status = ?, status = ? WHERE id = ?")
            .bind(payment_status.as_str())
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
