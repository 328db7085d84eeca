use serde::Deserialize;
use std::sync::Arc;

use crate::models::{Order, OrderItem, OrderStatus, PaymentState};
use crate::repositories::order_repository::NewOrder;
use crate::repositories::{OrderRepository, RepositoryError};

#[derive(Debug, thiserror::Error)]
pub enum OrderServiceError {
    #[error("Order not found")]
    OrderNotFound,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
}

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self { orders }
    }

    pub async fn create_order(
        &self,
        user_id: i64,
        request: CreateOrderRequest,
    ) -> Result<Order, OrderServiceError> {
        if request.items.is_empty() {
            return Err(OrderServiceError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }
        if request.items.iter().any(|item| item.quantity == 0) {
            return Err(OrderServiceError::Validation(
                "Item quantity must be at least 1".to_string(),
            ));
        }
        if request.items.iter().any(|item| item.price < 0) {
            return Err(OrderServiceError::Validation(
                "Item price cannot be negative".to_string(),
            ));
        }

        let total_amount = order_total(&request.items).ok_or_else(|| {
            OrderServiceError::Validation("Order total exceeds the supported amount".to_string())
        })?;

        let order = self
            .orders
            .create(NewOrder {
                order_number: order_number(),
                user_id,
                items: request.items,
                total_amount,
            })
            .await?;

        Ok(order)
    }

    pub async fn get_order(&self, id: i64) -> Result<Order, OrderServiceError> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or(OrderServiceError::OrderNotFound)
    }

    pub async fn orders_for_user(&self, user_id: i64) -> Result<Vec<Order>, OrderServiceError> {
        Ok(self.orders.list_for_user(user_id).await?)
    }

    pub async fn all_orders(&self) -> Result<Vec<Order>, OrderServiceError> {
        Ok(self.orders.list_all().await?)
    }

    pub async fn delete_order(&self, id: i64) -> Result<(), OrderServiceError> {
        match self.orders.delete(id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(OrderServiceError::OrderNotFound),
            Err(e) => Err(OrderServiceError::RepositoryError(e)),
        }
    }

    /// Record the checkout charge outcome. A paid order moves to processing;
    /// a failed charge leaves it pending for retry.
    pub async fn record_payment(&self, id: i64, paid: bool) -> Result<Order, OrderServiceError> {
        let (payment_status, status) = if paid {
            (PaymentState::Paid, OrderStatus::Processing)
        } else {
            (PaymentState::Failed, OrderStatus::Pending)
        };

        match self.orders.set_payment_state(id, payment_status, status).await {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => return Err(OrderServiceError::OrderNotFound),
            Err(e) => return Err(OrderServiceError::RepositoryError(e)),
        }

        self.orders
            .find_by_id(id)
            .await?
            .ok_or(OrderServiceError::OrderNotFound)
    }
}

/// Sum of line totals in cents. `None` when the client-supplied prices or
/// quantities would overflow.
fn order_total(items: &[OrderItem]) -> Option<i64> {
    items
        .iter()
        .try_fold(0i64, |total, item| total.checked_add(item.line_total()?))
}

/// `ORD-<millis>-<suffix>`, shown to customers as the order number.
fn order_number() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    format!("ORD-{}-{}", millis, &suffix[..4])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::order_repository::MockOrderRepository;

    fn item(price: i64, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: "p1".to_string(),
            product_name: "Widget".to_string(),
            price,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_create_order_rejects_empty_items() {
        let service = OrderService::new(Arc::new(MockOrderRepository::new()));

        let result = service
            .create_order(1, CreateOrderRequest { items: vec![] })
            .await;

        assert!(matches!(result, Err(OrderServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_order_rejects_zero_quantity() {
        let service = OrderService::new(Arc::new(MockOrderRepository::new()));

        let result = service
            .create_order(
                1,
                CreateOrderRequest {
                    items: vec![item(1000, 0)],
                },
            )
            .await;

        assert!(matches!(result, Err(OrderServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_order_rejects_negative_price() {
        let service = OrderService::new(Arc::new(MockOrderRepository::new()));

        let result = service
            .create_order(
                1,
                CreateOrderRequest {
                    items: vec![item(-5000, 1)],
                },
            )
            .await;

        assert!(matches!(result, Err(OrderServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_order_rejects_overflowing_total() {
        let service = OrderService::new(Arc::new(MockOrderRepository::new()));

        let result = service
            .create_order(
                1,
                CreateOrderRequest {
                    items: vec![item(i64::MAX, 2)],
                },
            )
            .await;

        assert!(matches!(result, Err(OrderServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_order_totals_items() {
        let mut repo = MockOrderRepository::new();
        repo.expect_create()
            .withf(|new_order| new_order.total_amount == 2500 && new_order.user_id == 7)
            .times(1)
            .returning(|new_order| {
                let order = Order {
                    id: 1,
                    order_number: new_order.order_number.clone(),
                    user_id: new_order.user_id,
                    items: new_order.items.clone(),
                    total_amount: new_order.total_amount,
                    status: OrderStatus::Pending,
                    payment_status: PaymentState::Pending,
                    created_at: None,
                };
                Box::pin(async move { Ok(order) })
            });

        let service = OrderService::new(Arc::new(repo));

        let order = service
            .create_order(
                7,
                CreateOrderRequest {
                    items: vec![item(1000, 2), item(500, 1)],
                },
            )
            .await
            .unwrap();

        assert_eq!(order.total_amount, 2500);
        assert!(order.order_number.starts_with("ORD-"));
    }

    #[test]
    fn order_number_format() {
        let number = order_number();
        let parts: Vec<&str> = number.splitn(3, '-').collect();
        assert_eq!(parts[0], "ORD");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 4);
    }
}
