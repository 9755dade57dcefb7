//! Repository for uploaded prospect documents.

use mirador_core::status::{STATUS_FAILED, STATUS_UPLOADED};
use mirador_core::types::DbId;
use sqlx::PgPool;

use crate::models::prospect::{CreateProspect, Prospect};

/// Column list for `prospects`.
const PROSPECT_COLUMNS: &str = "id, file_name, file_type, file_url, status, generated_title, \
     generated_description, generated_sections, error, created_at, updated_at";

/// Provides CRUD operations for prospects.
pub struct ProspectRepo;

impl ProspectRepo {
    /// Create a new prospect in 'uploaded' status.
    pub async fn create(pool: &PgPool, input: &CreateProspect) -> Result<Prospect, sqlx::Error> {
        let sql = format!(
            "INSERT INTO prospects (file_name, file_type, file_url, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {PROSPECT_COLUMNS}"
        );
        sqlx::query_as::<_, Prospect>(&sql)
            .bind(&input.file_name)
            .bind(&input.file_type)
            .bind(&input.file_url)
            .bind(STATUS_UPLOADED)
            .fetch_one(pool)
            .await
    }

    /// Find a prospect by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Prospect>, sqlx::Error> {
        let sql = format!("SELECT {PROSPECT_COLUMNS} FROM prospects WHERE id = $1");
        sqlx::query_as::<_, Prospect>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all prospects, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Prospect>, sqlx::Error> {
        let sql = format!("SELECT {PROSPECT_COLUMNS} FROM prospects ORDER BY created_at DESC");
        sqlx::query_as::<_, Prospect>(&sql).fetch_all(pool).await
    }

    /// Update a prospect's status, clearing any previous error.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Prospect>, sqlx::Error> {
        let sql = format!(
            "UPDATE prospects SET status = $2, error = NULL, updated_at = now() \
             WHERE id = $1 \
             RETURNING {PROSPECT_COLUMNS}"
        );
        sqlx::query_as::<_, Prospect>(&sql)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Move a prospect to 'failed' and record the error message.
    pub async fn fail(
        pool: &PgPool,
        id: DbId,
        error: &str,
    ) -> Result<Option<Prospect>, sqlx::Error> {
        let sql = format!(
            "UPDATE prospects SET status = $2, error = $3, updated_at = now() \
             WHERE id = $1 \
             RETURNING {PROSPECT_COLUMNS}"
        );
        sqlx::query_as::<_, Prospect>(&sql)
            .bind(id)
            .bind(STATUS_FAILED)
            .bind(error)
            .fetch_optional(pool)
            .await
    }

    /// Store the generated fields after a successful mapping run.
    pub async fn update_generated(
        pool: &PgPool,
        id: DbId,
        title: &str,
        description: &str,
        sections: &serde_json::Value,
    ) -> Result<Option<Prospect>, sqlx::Error> {
        let sql = format!(
            "UPDATE prospects SET \
                generated_title = $2, \
                generated_description = $3, \
                generated_sections = $4, \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {PROSPECT_COLUMNS}"
        );
        sqlx::query_as::<_, Prospect>(&sql)
            .bind(id)
            .bind(title)
            .bind(description)
            .bind(sections)
            .fetch_optional(pool)
            .await
    }

    /// Delete a prospect. Returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prospects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
