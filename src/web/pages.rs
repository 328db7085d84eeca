use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use super::WebState;
use crate::models::order::format_cents;
use crate::models::user::PublicUser;
use crate::models::{Order, OrderItem};

// ---------------------------------------------------------------------------
// View models

pub struct ItemView {
    pub name: String,
    pub quantity: u32,
    pub price: String,
}

pub struct OrderView {
    pub id: i64,
    pub order_number: String,
    pub user_id: i64,
    pub created_at: String,
    pub status: &'static str,
    pub payment_status: &'static str,
    pub total: String,
    pub items: Vec<ItemView>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        OrderView {
            id: order.id,
            order_number: order.order_number.clone(),
            user_id: order.user_id,
            created_at: order.created_at.clone().unwrap_or_default(),
            status: order.status.as_str(),
            payment_status: order.payment_status.as_str(),
            total: order.total_display(),
            items: order
                .items
                .iter()
                .map(|item| ItemView {
                    name: item.product_name.clone(),
                    quantity: item.quantity,
                    price: format_cents(item.price),
                })
                .collect(),
        }
    }
}

pub struct ProductView {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price_cents: i64,
    pub price: String,
}

/// Demo catalog. There is no product service; the catalog is fixed.
fn catalog() -> Vec<ProductView> {
    let raw: [(&'static str, &'static str, &'static str, i64); 4] = [
        ("p-keyboard", "Mechanical Keyboard", "Tenkeyless, brown switches", 8900),
        ("p-mouse", "Wireless Mouse", "Ergonomic, 6 buttons", 3500),
        ("p-monitor", "27\" Monitor", "1440p IPS panel", 24900),
        ("p-headset", "USB Headset", "Closed back, noise cancelling mic", 5900),
    ];

    raw.into_iter()
        .map(|(id, name, description, price_cents)| ProductView {
            id,
            name,
            description,
            price_cents,
            price: format_cents(price_cents),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Templates

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {
    error_message: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
struct RegisterTemplate {
    error_message: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
struct ProductsTemplate {
    products: Vec<ProductView>,
    logged_in: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
struct CheckoutTemplate {
    error_message: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
struct OrdersTemplate {
    orders: Vec<OrderView>,
    info_message: String,
    error_message: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin_orders.html")]
struct AdminOrdersTemplate {
    orders: Vec<OrderView>,
    info_message: String,
    error_message: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    success: Option<String>,
    error: Option<String>,
}

// ---------------------------------------------------------------------------
// Session helpers

async fn session_token(session: &Session) -> Option<String> {
    session.get::<String>("token").await.ok().flatten()
}

async fn session_user(session: &Session) -> Option<PublicUser> {
    session.get::<PublicUser>("user").await.ok().flatten()
}

// ---------------------------------------------------------------------------
// Auth pages

pub async fn login_page(Query(query): Query<PageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error_message: query.error.unwrap_or_default(),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

pub async fn submit_login(
    State(state): State<WebState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.gateway.login(&form.email, &form.password).await {
        Ok(payload) => {
            let login = async {
                session.insert("token", &payload.token).await?;
                session.insert("user", &payload.user).await
            };
            if login.await.is_err() {
                return LoginTemplate {
                    error_message: "Session error, please try again".to_string(),
                }
                .into_response();
            }
            Redirect::to("/products").into_response()
        }
        Err(e) => LoginTemplate {
            error_message: e.to_string(),
        }
        .into_response(),
    }
}

pub async fn register_page(Query(query): Query<PageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error_message: query.error.unwrap_or_default(),
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    name: String,
    email: String,
    password: String,
}

pub async fn submit_register(
    State(state): State<WebState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    match state
        .gateway
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(payload) => {
            let login = async {
                session.insert("token", &payload.token).await?;
                session.insert("user", &payload.user).await
            };
            if login.await.is_err() {
                return RegisterTemplate {
                    error_message: "Session error, please try again".to_string(),
                }
                .into_response();
            }
            Redirect::to("/products").into_response()
        }
        Err(e) => RegisterTemplate {
            error_message: e.to_string(),
        }
        .into_response(),
    }
}

pub async fn logout(session: Session) -> Response {
    let _ = session.flush().await;
    Redirect::to("/login").into_response()
}

// ---------------------------------------------------------------------------
// Shop pages

pub async fn products_page(session: Session) -> impl IntoResponse {
    ProductsTemplate {
        products: catalog(),
        logged_in: session_token(&session).await.is_some(),
    }
}

pub async fn checkout_page(Query(query): Query<PageQuery>) -> impl IntoResponse {
    CheckoutTemplate {
        error_message: query.error.unwrap_or_default(),
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    /// Serialized cart from localStorage, filled in by the page script.
    items: String,
    payment_method: String,
    card_number: String,
}

pub async fn submit_checkout(
    State(state): State<WebState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Response {
    let Some(token) = session_token(&session).await else {
        return Redirect::to("/login").into_response();
    };

    let items: Vec<OrderItem> = match serde_json::from_str(&form.items) {
        Ok(items) => items,
        Err(_) => return Redirect::to("/checkout?error=Your cart could not be read").into_response(),
    };
    if items.is_empty() {
        return Redirect::to("/checkout?error=Your cart is empty").into_response();
    }

    let order = match state.gateway.create_order(&token, &items).await {
        Ok(order) => order,
        Err(e) => {
            tracing::warn!("order creation failed: {}", e);
            return Redirect::to("/checkout?error=Order could not be created").into_response();
        }
    };

    let card_last4 = last4(&form.card_number);
    let paid = match state
        .gateway
        .process_payment(order.id, order.total_amount, &form.payment_method, &card_last4)
        .await
    {
        Ok((approved, _payment)) => approved,
        Err(e) => {
            tracing::warn!(order_id = order.id, "payment call failed: {}", e);
            false
        }
    };

    if let Err(e) = state
        .gateway
        .record_order_payment(&token, order.id, paid)
        .await
    {
        tracing::warn!(order_id = order.id, "recording payment state failed: {}", e);
    }

    if paid {
        Redirect::to("/orders?success=Order placed successfully").into_response()
    } else {
        Redirect::to("/orders?error=Payment failed, order kept as pending").into_response()
    }
}

fn last4(card_number: &str) -> String {
    let digits: String = card_number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() >= 4 {
        digits[digits.len() - 4..].to_string()
    } else {
        "****".to_string()
    }
}

pub async fn orders_page(
    State(state): State<WebState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    let Some(token) = session_token(&session).await else {
        return Redirect::to("/login").into_response();
    };

    match state.gateway.my_orders(&token).await {
        Ok(orders) => OrdersTemplate {
            orders: orders.into_iter().map(OrderView::from).collect(),
            info_message: query.success.unwrap_or_default(),
            error_message: query.error.unwrap_or_default(),
        }
        .into_response(),
        Err(e) => OrdersTemplate {
            orders: vec![],
            info_message: String::new(),
            error_message: e.to_string(),
        }
        .into_response(),
    }
}

// ---------------------------------------------------------------------------
// Admin pages

pub async fn admin_orders_page(
    State(state): State<WebState>,
    session: Session,
    Query(query): Query<PageQuery>,
) -> Response {
    let Some(token) = session_token(&session).await else {
        return Redirect::to("/login").into_response();
    };
    match session_user(&session).await {
        Some(user) if user.role.is_admin() => {}
        _ => return Redirect::to("/orders").into_response(),
    }

    match state.gateway.admin_orders(&token).await {
        Ok(orders) => AdminOrdersTemplate {
            orders: orders.into_iter().map(OrderView::from).collect(),
            info_message: query.success.unwrap_or_default(),
            error_message: query.error.unwrap_or_default(),
        }
        .into_response(),
        Err(e) => AdminOrdersTemplate {
            orders: vec![],
            info_message: String::new(),
            error_message: e.to_string(),
        }
        .into_response(),
    }
}

pub async fn admin_delete_order(
    State(state): State<WebState>,
    session: Session,
    Path(id): Path<i64>,
) -> Response {
    let Some(token) = session_token(&session).await else {
        return Redirect::to("/login").into_response();
    };

    match state.gateway.delete_order(&token, id).await {
        Ok(()) => Redirect::to("/admin/orders?success=Order deleted successfully").into_response(),
        Err(e) => {
            tracing::warn!(order_id = id, "order delete failed: {}", e);
            Redirect::to("/admin/orders?error=Failed to delete order").into_response()
        }
    }
}
