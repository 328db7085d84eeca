pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, TokenService};
