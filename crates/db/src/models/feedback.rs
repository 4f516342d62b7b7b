//! Feedback (contact form submission) model.

use salon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `feedback` table. Written once by the public form.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub message: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub name: String,
    pub phone: String,
    pub message: Option<String>,
}
