//! Repository for the `categories` table.

use salon_core::category::CategoryType;
use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::{Category, CategoryUsage, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, type, created_at, updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, slug, type) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.category_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List categories ordered by name.
    ///
    /// With a type filter, returns categories of that type plus every `both`
    /// category.
    pub async fn list(
        pool: &PgPool,
        type_filter: Option<CategoryType>,
    ) -> Result<Vec<Category>, sqlx::Error> {
        match type_filter {
            Some(filter) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM categories \
                     WHERE type = $1 OR type = 'both' \
                     ORDER BY name"
                );
                sqlx::query_as::<_, Category>(&query)
                    .bind(filter.as_str())
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name");
                sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
            }
        }
    }

    /// Whether `name`, ignoring case, is used by a category other than `except_id`.
    pub async fn name_taken(
        pool: &PgPool,
        name: &str,
        except_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE LOWER(name) = LOWER($1) AND ($2::BIGINT IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(except_id)
        .fetch_one(pool)
        .await?;
        Ok(taken)
    }

    /// Update a category. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                name = COALESCE($2, name), \
                slug = COALESCE($3, slug), \
                type = COALESCE($4, type) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.category_type.map(CategoryType::as_str))
            .fetch_optional(pool)
            .await
    }

    /// Count services and portfolio items referencing a category.
    pub async fn usage(pool: &PgPool, id: DbId) -> Result<CategoryUsage, sqlx::Error> {
        sqlx::query_as::<_, CategoryUsage>(
            "SELECT \
                (SELECT COUNT(*) FROM services WHERE category_id = $1) AS services, \
                (SELECT COUNT(*) FROM portfolios WHERE category_id = $1) AS portfolios",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Hard-delete a category. Returns `true` if a row was removed.
    ///
    /// Fails with a foreign-key violation if the category is still referenced;
    /// callers check [`CategoryRepo::usage`] first to report it cleanly.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a category unless one with the same name exists.
    ///
    /// Returns `true` when a row was created.
    pub async fn insert_if_missing(
        pool: &PgPool,
        input: &CreateCategory,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO categories (name, slug, type) VALUES ($1, $2, $3) \
             ON CONFLICT (LOWER(name)) DO NOTHING",
        )
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.category_type.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
