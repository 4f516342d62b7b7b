pub mod auth;
pub mod category;
pub mod feedback;
pub mod health;
pub mod portfolio;
pub mod service;

use axum::Router;

use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                          login (public)
/// /logout                         logout (requires auth)
/// /user                           current user (requires auth)
///
/// /feedback                       submit contact form (public, CAPTCHA in production)
/// /services                       price list (public)
/// /portfolio                      gallery (public)
/// /categories                     categories, ?type= (public)
///
/// /admin/categories               list, create
/// /admin/categories/{id}          update, delete
/// /admin/services                 list, create
/// /admin/services/{id}            update, delete
/// /admin/portfolio                list, create (multipart)
/// /admin/portfolio/{id}           update (PUT or POST, multipart), delete
/// /admin/feedback                 list
/// /admin/feedback/{id}            delete
/// ```
///
/// Every `/admin` route requires an admin user; see [`RequireAdmin`].
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .nest("/categories", category::admin_router())
        .nest("/services", service::admin_router())
        .nest("/portfolio", portfolio::admin_router(&state.config))
        .nest("/feedback", feedback::admin_router())
        .route_layer(axum::middleware::from_extractor_with_state::<
            RequireAdmin,
            AppState,
        >(state.clone()));

    Router::new()
        .merge(auth::router())
        .merge(feedback::public_router())
        .merge(service::public_router())
        .merge(portfolio::public_router())
        .merge(category::public_router())
        .nest("/admin", admin)
}
