//! Category entity model and DTOs.

use salon_core::category::CategoryType;
use salon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a category. The slug is derived by the caller.
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    pub category_type: CategoryType,
}

/// DTO for a partial category update.
///
/// `slug` must be set whenever `name` is, so the two never drift apart.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub category_type: Option<CategoryType>,
}

/// How many rows reference a category.
#[derive(Debug, Clone, Copy, FromRow, PartialEq, Eq)]
pub struct CategoryUsage {
    pub services: i64,
    pub portfolios: i64,
}

impl CategoryUsage {
    pub fn is_used(&self) -> bool {
        self.services > 0 || self.portfolios > 0
    }
}
