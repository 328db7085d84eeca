pub mod order_repository;
pub mod payment_repository;
pub mod profile_repository;
pub mod user_repository;

pub use order_repository::{OrderRepository, SqliteOrderRepository};
pub use payment_repository::{PaymentRepository, SqlitePaymentRepository};
pub use profile_repository::{ProfileRepository, SqliteProfileRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Record not found")]
    NotFound,
    #[error("Record already exists")]
    AlreadyExists,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
