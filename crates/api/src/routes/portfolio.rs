//! Route definitions for portfolio items.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers::portfolio;
use crate::state::AppState;

/// Room for multipart boundaries and the text fields next to the image.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// ```text
/// GET /portfolio    -> list_portfolio
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/portfolio", get(portfolio::list_portfolio))
}

/// Routes mounted at `/admin/portfolio`.
///
/// ```text
/// GET    /        -> list_portfolio
/// POST   /        -> create_portfolio
/// PUT    /{id}    -> update_portfolio
/// POST   /{id}    -> update_portfolio (for HTML forms)
/// DELETE /{id}    -> delete_portfolio
/// ```
pub fn admin_router(config: &ServerConfig) -> Router<AppState> {
    let body_limit = (config.storage.max_image_kb as usize)
        .saturating_mul(1024)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route(
            "/",
            get(portfolio::list_portfolio).post(portfolio::create_portfolio),
        )
        .route(
            "/{id}",
            put(portfolio::update_portfolio)
                .post(portfolio::update_portfolio)
                .delete(portfolio::delete_portfolio),
        )
        .layer(DefaultBodyLimit::max(body_limit))
}
