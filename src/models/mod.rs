pub mod order;
pub mod payment;
pub mod response;
pub mod user;

pub use order::{Order, OrderItem, OrderStatus, PaymentState};
pub use payment::{Payment, PaymentStatus};
pub use response::ApiResponse;
pub use user::{Role, User, UserProfile};
