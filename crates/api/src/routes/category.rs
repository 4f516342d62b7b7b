//! Route definitions for categories.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// ```text
/// GET /categories    -> list_categories
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/categories", get(category::list_categories))
}

/// Routes mounted at `/admin/categories`.
///
/// ```text
/// GET    /        -> list_categories
/// POST   /        -> create_category
/// PUT    /{id}    -> update_category
/// DELETE /{id}    -> delete_category
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/{id}",
            put(category::update_category).delete(category::delete_category),
        )
}
