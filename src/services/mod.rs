pub mod auth_service;
pub mod order_service;
pub mod payment_service;
pub mod profile_sync;
pub mod user_service;

pub use auth_service::AuthService;
pub use order_service::OrderService;
pub use payment_service::PaymentService;
pub use profile_sync::ProfileSyncClient;
pub use user_service::UserService;
