use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::models::{ApiResponse, Order, OrderItem, Payment};
use crate::services::auth_service::AuthPayload;

#[derive(Debug, thiserror::Error)]
pub enum WebClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The gateway answered with success=false; the message is user-facing.
    #[error("{0}")]
    Api(String),
}

/// reqwest wrapper for the web frontend's calls through the gateway.
#[derive(Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthPayload, WebClientError> {
        let envelope = self
            .send(
                reqwest::Method::POST,
                "/auth/register",
                None,
                Some(json!({ "name": name, "email": email, "password": password })),
            )
            .await?;
        expect_success(envelope)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, WebClientError> {
        let envelope = self
            .send(
                reqwest::Method::POST,
                "/auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await?;
        expect_success(envelope)
    }

    pub async fn my_orders(&self, token: &str) -> Result<Vec<Order>, WebClientError> {
        let envelope = self
            .send(reqwest::Method::GET, "/orders", Some(token), None)
            .await?;
        expect_success(envelope)
    }

    pub async fn admin_orders(&self, token: &str) -> Result<Vec<Order>, WebClientError> {
        let envelope = self
            .send(reqwest::Method::GET, "/orders/admin", Some(token), None)
            .await?;
        expect_success(envelope)
    }

    pub async fn delete_order(&self, token: &str, id: i64) -> Result<(), WebClientError> {
        let envelope: ApiResponse<Value> = self
            .send(
                reqwest::Method::DELETE,
                &format!("/orders/{}", id),
                Some(token),
                None,
            )
            .await?;
        expect_success(envelope).map(|_| ())
    }

    pub async fn create_order(
        &self,
        token: &str,
        items: &[OrderItem],
    ) -> Result<Order, WebClientError> {
        let envelope = self
            .send(
                reqwest::Method::POST,
                "/orders",
                Some(token),
                Some(json!({ "items": items })),
            )
            .await?;
        expect_success(envelope)
    }

    /// Charge the payment service. Returns the persisted payment and whether
    /// the simulated gateway approved it; a decline is not an error here.
    pub async fn process_payment(
        &self,
        order_id: i64,
        amount: i64,
        payment_method: &str,
        card_last4: &str,
    ) -> Result<(bool, Payment), WebClientError> {
        let envelope: ApiResponse<Payment> = self
            .send(
                reqwest::Method::POST,
                "/payments/process",
                None,
                Some(json!({
                    "order_id": order_id,
                    "amount": amount,
                    "payment_method": payment_method,
                    "card_last4": card_last4,
                })),
            )
            .await?;

        let approved = envelope.success;
        let payment = envelope
            .data
            .ok_or_else(|| WebClientError::Api("Payment service returned no data".to_string()))?;
        Ok((approved, payment))
    }

    pub async fn record_order_payment(
        &self,
        token: &str,
        order_id: i64,
        paid: bool,
    ) -> Result<Order, WebClientError> {
        let envelope = self
            .send(
                reqwest::Method::PATCH,
                &format!("/orders/{}/payment", order_id),
                Some(token),
                Some(json!({ "paid": paid })),
            )
            .await?;
        expect_success(envelope)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Result<ApiResponse<T>, WebClientError> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let envelope = request.send().await?.json::<ApiResponse<T>>().await?;
        Ok(envelope)
    }
}

fn expect_success<T>(envelope: ApiResponse<T>) -> Result<T, WebClientError> {
    if !envelope.success {
        return Err(WebClientError::Api(
            envelope
                .message
                .unwrap_or_else(|| "Request failed".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| WebClientError::Api("Response had no data".to_string()))
}
