//! Admin access control.
//!
//! [`RequireAdmin`] wraps [`AuthUser`] and additionally loads the user row so
//! the `is_admin` flag is always read from the database, never from the token.
//! The router applies it to the whole `/admin` subtree.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use salon_core::error::CoreError;
use salon_db::models::user::User;
use salon_db::repositories::UserRepo;

use super::auth::{AuthUser, UNAUTHENTICATED};
use crate::error::AppError;
use crate::state::AppState;

/// Requires an authenticated user with `is_admin = true`.
///
/// Rejects with 401 when the token is missing, invalid, revoked, or belongs to
/// a user that no longer exists, and with 403 for non-admin users.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user.is_admin is guaranteed here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub User);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let user = UserRepo::find_by_id(&state.pool, auth.user_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(UNAUTHENTICATED.into())))?;

        if !user.is_admin {
            tracing::warn!(user_id = user.id, "Non-admin user denied admin route");
            return Err(AppError::Core(CoreError::Forbidden("Forbidden".into())));
        }

        Ok(RequireAdmin(user))
    }
}
