//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod feedback_repo;
pub mod portfolio_repo;
pub mod revoked_token_repo;
pub mod service_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use feedback_repo::FeedbackRepo;
pub use portfolio_repo::PortfolioRepo;
pub use revoked_token_repo::RevokedTokenRepo;
pub use service_repo::ServiceRepo;
pub use user_repo::UserRepo;
