//! Request handlers, one module per resource.
//!
//! Public and admin endpoints of the same resource live in the same module;
//! the router decides which of them sit behind the admin guard.

pub mod auth;
pub mod category;
pub mod feedback;
pub mod portfolio;
pub mod service;

use salon_core::error::CoreError;
use salon_core::types::DbId;
use salon_db::repositories::CategoryRepo;
use serde::Serialize;
use validator::ValidationError;

use crate::error::AppResult;
use crate::state::AppState;

/// `{"message": "..."}` body returned by mutations without a payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Rejects strings that are empty after trimming.
pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message("Поле обязательно для заполнения.".into()));
    }
    Ok(())
}

/// Fails with a field error on `category_id` unless the category exists.
pub(crate) async fn ensure_category_exists(state: &AppState, category_id: DbId) -> AppResult<()> {
    if CategoryRepo::find_by_id(&state.pool, category_id).await?.is_none() {
        return Err(CoreError::field(
            "category_id",
            "Выбранное значение для category_id некорректно.",
        )
        .into());
    }
    Ok(())
}
