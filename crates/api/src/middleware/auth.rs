//! Bearer token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use salon_core::error::CoreError;
use salon_core::types::DbId;
use salon_db::repositories::RevokedTokenRepo;

use crate::auth::jwt::{validate_token, Claims};
use crate::error::AppError;
use crate::state::AppState;

/// Message returned for every authentication failure.
pub const UNAUTHENTICATED: &str = "Unauthenticated.";

/// Authenticated user extracted from a Bearer token in the `Authorization` header.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The decoded token, kept so logout can revoke it.
    pub claims: Claims,
}

fn unauthenticated() -> AppError {
    AppError::Core(CoreError::Unauthorized(UNAUTHENTICATED.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(unauthenticated)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            unauthenticated()
        })?;

        if RevokedTokenRepo::is_revoked(&state.pool, &claims.jti).await? {
            return Err(unauthenticated());
        }

        Ok(AuthUser {
            user_id: claims.sub,
            claims,
        })
    }
}
