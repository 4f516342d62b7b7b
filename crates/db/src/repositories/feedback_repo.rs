//! Repository for the `feedback` table.

use salon_core::types::DbId;
use sqlx::PgPool;

use crate::models::feedback::{CreateFeedback, Feedback};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, phone, message, created_at, updated_at";

/// Provides create/list/delete for feedback submissions.
pub struct FeedbackRepo;

impl FeedbackRepo {
    /// Insert a new submission, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFeedback) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (name, phone, message) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// List all submissions, newest first.
    pub async fn list_latest(pool: &PgPool) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM feedback ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Feedback>(&query).fetch_all(pool).await
    }

    /// Hard-delete a submission. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM feedback WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
