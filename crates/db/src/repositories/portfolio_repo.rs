//! Repository for the `portfolios` table.

use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::portfolio::{CreatePortfolio, Portfolio, UpdatePortfolio};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, category_id, title, image_path, created_at, updated_at";

/// Provides CRUD operations for portfolio items.
pub struct PortfolioRepo;

impl PortfolioRepo {
    /// Insert a new portfolio item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreatePortfolio) -> Result<Portfolio, sqlx::Error> {
        let query = format!(
            "INSERT INTO portfolios (category_id, title, image_path) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.image_path)
            .fetch_one(pool)
            .await
    }

    /// Find a portfolio item by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Portfolio>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM portfolios WHERE id = $1");
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List portfolio items, newest first, optionally for one category.
    pub async fn list(
        pool: &PgPool,
        category_id: Option<DbId>,
    ) -> Result<Vec<Portfolio>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM portfolios \
             WHERE ($1::BIGINT IS NULL OR category_id = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Update a portfolio item. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePortfolio,
    ) -> Result<Option<Portfolio>, sqlx::Error> {
        let query = format!(
            "UPDATE portfolios SET \
                category_id = COALESCE($2, category_id), \
                title = COALESCE($3, title), \
                image_path = COALESCE($4, image_path) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Portfolio>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.image_path)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a portfolio item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM portfolios WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
