//! Route definitions for services.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::service;
use crate::state::AppState;

/// ```text
/// GET /services    -> list_services
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/services", get(service::list_services))
}

/// Routes mounted at `/admin/services`.
///
/// ```text
/// GET    /        -> list_services
/// POST   /        -> create_service
/// PUT    /{id}    -> update_service
/// DELETE /{id}    -> delete_service
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(service::list_services).post(service::create_service))
        .route(
            "/{id}",
            put(service::update_service).delete(service::delete_service),
        )
}
