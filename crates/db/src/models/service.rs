//! Service (price list entry) model and DTOs.

use salon_core::category::CategoryType;
use salon_core::prices::Prices;
use salon_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub prices: Json<Prices>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The category columns joined onto a service listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceCategory {
    #[sqlx(rename = "category_id")]
    pub id: DbId,
    #[sqlx(rename = "category_name")]
    pub name: String,
    #[sqlx(rename = "category_slug")]
    pub slug: String,
    #[sqlx(rename = "category_type", try_from = "String")]
    #[serde(rename = "type")]
    pub category_type: CategoryType,
}

/// A service with its category embedded, as served by the listing endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ServiceWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub service: Service,
    #[sqlx(flatten)]
    pub category: ServiceCategory,
}

/// DTO for creating a service.
#[derive(Debug, Clone)]
pub struct CreateService {
    pub category_id: DbId,
    pub name: String,
    pub prices: Prices,
}

/// DTO for a partial service update.
#[derive(Debug, Clone, Default)]
pub struct UpdateService {
    pub category_id: Option<DbId>,
    pub name: Option<String>,
    pub prices: Option<Prices>,
}
