//! Handlers for login, logout, and the current user.

use axum::extract::State;
use axum::Json;
use salon_core::error::CoreError;
use salon_db::models::user::UserResponse;
use salon_db::repositories::{RevokedTokenRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::MessageResponse;
use crate::auth::jwt::generate_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, UNAUTHENTICATED};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Неверный логин или пароль";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "Поле email обязательно для заполнения."))]
    pub email: Option<String>,
    #[validate(required(message = "Поле password обязательно для заполнения."))]
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with email + password and issue a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    input.validate()?;
    let email = input.email.unwrap_or_default();
    let password = input.password.unwrap_or_default();

    let invalid = || AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));

    let user = UserRepo::find_by_email(&state.pool, email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Failed login attempt");
        return Err(invalid());
    }

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: state.config.jwt.expiry_mins * 60,
        user: user.into(),
    }))
}

/// POST /api/logout
///
/// Revoke the presented token. Other tokens of the same user stay valid.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    RevokedTokenRepo::revoke(
        &state.pool,
        &auth_user.claims.jti,
        auth_user.user_id,
        auth_user.claims.expires_at(),
    )
    .await?;

    let purged = RevokedTokenRepo::purge_expired(&state.pool).await?;
    tracing::info!(user_id = auth_user.user_id, purged, "User logged out");

    Ok(Json(MessageResponse::new("Вы успешно вышли.")))
}

/// GET /api/user
pub async fn current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(UNAUTHENTICATED.into())))?;
    Ok(Json(user.into()))
}
