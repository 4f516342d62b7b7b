use std::sync::Arc;

use crate::captcha::CaptchaVerifier;
use crate::config::ServerConfig;
use crate::storage::PublicDisk;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: salon_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Public disk holding uploaded portfolio images.
    pub storage: Arc<PublicDisk>,
    /// CAPTCHA verifier consulted by the feedback form in production.
    pub captcha: Arc<dyn CaptchaVerifier>,
}
