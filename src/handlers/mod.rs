pub mod auth_handlers;
pub mod order_handlers;
pub mod payment_handlers;
pub mod user_handlers;
