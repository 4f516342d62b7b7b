//! Route definitions for feedback.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// ```text
/// POST /feedback    -> create_feedback
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new().route("/feedback", post(feedback::create_feedback))
}

/// Routes mounted at `/admin/feedback`.
///
/// ```text
/// GET    /        -> list_feedback
/// DELETE /{id}    -> delete_feedback
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(feedback::list_feedback))
        .route("/{id}", delete(feedback::delete_feedback))
}
