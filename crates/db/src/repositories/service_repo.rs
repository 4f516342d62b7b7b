//! Repository for the `services` table.

use salon_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::service::{CreateService, Service, ServiceWithCategory, UpdateService};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, name, prices, created_at, updated_at";

/// Columns for listings that embed the owning category.
const JOINED_COLUMNS: &str = "s.id, s.category_id, s.name, s.prices, s.created_at, s.updated_at, \
                              c.name AS category_name, c.slug AS category_slug, \
                              c.type AS category_type";

/// Provides CRUD operations for services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new service, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateService) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (category_id, name, prices) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(Json(&input.prices))
            .fetch_one(pool)
            .await
    }

    /// Find a service together with its category.
    pub async fn find_with_category(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ServiceWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM services s \
             JOIN categories c ON c.id = s.category_id \
             WHERE s.id = $1"
        );
        sqlx::query_as::<_, ServiceWithCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List services with their category, grouped by category name then
    /// service id. Optionally restricted to one category.
    pub async fn list_with_category(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<ServiceWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM services s \
             JOIN categories c ON c.id = s.category_id \
             WHERE ($1::BIGINT IS NULL OR s.category_id = $1) \
             ORDER BY c.name, s.id"
        );
        sqlx::query_as::<_, ServiceWithCategory>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Update a service. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET \
                category_id = COALESCE($2, category_id), \
                name = COALESCE($3, name), \
                prices = COALESCE($4, prices) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.name)
            .bind(input.prices.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a service. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
