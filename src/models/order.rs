use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> OrderStatus {
        match s {
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Pending,
        }
    }
}

/// Whether the order has been charged successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Pending,
    Paid,
    Failed,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Pending => "pending",
            PaymentState::Paid => "paid",
            PaymentState::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> PaymentState {
        match s {
            "paid" => PaymentState::Paid,
            "failed" => PaymentState::Failed,
            _ => PaymentState::Pending,
        }
    }
}

/// A line item on an order. Price is a unit price in cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub product_name: String,
    pub price: i64,
    pub quantity: u32,
}

impl OrderItem {
    /// Price times quantity; `None` when the product overflows. Both fields
    /// arrive from client JSON and are not trusted.
    pub fn line_total(&self) -> Option<i64> {
        self.price.checked_mul(i64::from(self.quantity))
    }
}

/// Order record. Items are stored as a JSON document alongside the order,
/// matching the document-store shape of the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub user_id: i64,
    pub items: Vec<OrderItem>,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub payment_status: PaymentState,
    pub created_at: Option<String>,
}

impl Order {
    /// Dollar rendering for the web pages.
    pub fn total_display(&self) -> String {
        format_cents(self.total_amount)
    }
}

pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, (cents / 100).abs(), (cents % 100).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_quantity() {
        let item = OrderItem {
            product_id: "p1".to_string(),
            product_name: "Widget".to_string(),
            price: 1299,
            quantity: 3,
        };
        assert_eq!(item.line_total(), Some(3897));
    }

    #[test]
    fn line_total_reports_overflow() {
        let item = OrderItem {
            product_id: "p1".to_string(),
            product_name: "Widget".to_string(),
            price: i64::MAX,
            quantity: 2,
        };
        assert_eq!(item.line_total(), None);
    }

    #[test]
    fn cents_format_pads_fraction() {
        assert_eq!(format_cents(1050), "10.50");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(100), "1.00");
    }

    #[test]
    fn cents_format_keeps_sign_below_one_dollar() {
        assert_eq!(format_cents(-50), "-0.50");
        assert_eq!(format_cents(-1050), "-10.50");
    }
}
