//! Handlers for the public contact form and its admin inbox.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use salon_core::error::CoreError;
use salon_core::types::DbId;
use salon_db::models::feedback::{CreateFeedback, Feedback};
use salon_db::repositories::FeedbackRepo;
use serde::Deserialize;
use validator::Validate;

use super::{non_blank, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

const CAPTCHA_FAILED: &str = "Не пройдена проверка reCAPTCHA";

/// Request body for `POST /feedback`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFeedbackRequest {
    #[validate(
        required(message = "Поле name обязательно для заполнения."),
        custom(function = "non_blank"),
        length(max = 255, message = "Поле name не может быть длиннее 255 символов.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Поле phone обязательно для заполнения."),
        custom(function = "non_blank"),
        length(max = 20, message = "Поле phone не может быть длиннее 20 символов.")
    )]
    pub phone: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "g-recaptcha-response")]
    pub captcha_token: Option<String>,
}

/// Client address as reported by the reverse proxy, if any.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
}

/// Checks the CAPTCHA token. Transport failures count as a failed check.
async fn check_captcha(
    state: &AppState,
    token: Option<&str>,
    remote_ip: Option<&str>,
) -> AppResult<()> {
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return Err(CoreError::field("captcha", CAPTCHA_FAILED).into());
    };

    let passed = match state.captcha.verify(token, remote_ip).await {
        Ok(passed) => passed,
        Err(e) => {
            tracing::error!(error = %e, "CAPTCHA verification request failed");
            false
        }
    };

    if !passed {
        return Err(CoreError::field("captcha", CAPTCHA_FAILED).into());
    }
    Ok(())
}

/// POST /api/feedback
///
/// Public contact form. The CAPTCHA is only checked in production.
pub async fn create_feedback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateFeedbackRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    input.validate()?;

    if state.config.environment.is_production() {
        let ip = client_ip(&headers);
        check_captcha(&state, input.captcha_token.as_deref(), ip.as_deref()).await?;
    }

    let create = CreateFeedback {
        name: input.name.unwrap_or_default().trim().to_string(),
        phone: input.phone.unwrap_or_default().trim().to_string(),
        message: input
            .message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty()),
    };
    let feedback = FeedbackRepo::create(&state.pool, &create).await?;
    tracing::info!(feedback_id = feedback.id, "Feedback received");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Спасибо! Мы с вами свяжемся.")),
    ))
}

/// GET /api/admin/feedback
pub async fn list_feedback(State(state): State<AppState>) -> AppResult<Json<Vec<Feedback>>> {
    let feedback = FeedbackRepo::list_latest(&state.pool).await?;
    Ok(Json(feedback))
}

/// DELETE /api/admin/feedback/{id}
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    if !FeedbackRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Feedback",
            id,
        }));
    }
    tracing::info!(feedback_id = id, "Feedback deleted");
    Ok(Json(MessageResponse::new("Удалено")))
}
