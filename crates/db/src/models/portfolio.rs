//! Portfolio item model and DTOs.

use salon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `portfolios` table.
///
/// `image_path` is relative to the public storage disk; the API adds the
/// absolute `image_url` when serving it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Portfolio {
    pub id: DbId,
    pub category_id: DbId,
    pub title: Option<String>,
    pub image_path: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a portfolio item.
#[derive(Debug, Clone)]
pub struct CreatePortfolio {
    pub category_id: DbId,
    pub title: Option<String>,
    pub image_path: String,
}

/// DTO for a partial portfolio update.
#[derive(Debug, Clone, Default)]
pub struct UpdatePortfolio {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    pub image_path: Option<String>,
}
