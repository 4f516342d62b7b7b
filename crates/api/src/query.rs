//! Shared query parameter types for API handlers.

use salon_core::types::DbId;
use serde::Deserialize;

/// `?type=` filter for category listings. Kept as a string so an unknown
/// value is reported as a field error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListParams {
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

/// `?category_id=` filter for service and portfolio listings.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryFilterParams {
    pub category_id: Option<DbId>,
}
