//! Repository for generated mini-sites.

use mirador_core::types::DbId;
use sqlx::PgPool;

use crate::models::minisite::Minisite;

/// Column list for `minisites`.
const MINISITE_COLUMNS: &str = "id, project_id, slug, published, created_at";

/// Provides CRUD operations for mini-sites.
pub struct MinisiteRepo;

impl MinisiteRepo {
    /// Insert a new mini-site for a project.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        slug: &str,
    ) -> Result<Minisite, sqlx::Error> {
        let sql = format!(
            "INSERT INTO minisites (project_id, slug) \
             VALUES ($1, $2) \
             RETURNING {MINISITE_COLUMNS}"
        );
        sqlx::query_as::<_, Minisite>(&sql)
            .bind(project_id)
            .bind(slug)
            .fetch_one(pool)
            .await
    }

    /// Find a mini-site by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Minisite>, sqlx::Error> {
        let sql = format!("SELECT {MINISITE_COLUMNS} FROM minisites WHERE slug = $1");
        sqlx::query_as::<_, Minisite>(&sql)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find the mini-site for a project, if one has been generated.
    pub async fn find_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Minisite>, sqlx::Error> {
        let sql = format!("SELECT {MINISITE_COLUMNS} FROM minisites WHERE project_id = $1");
        sqlx::query_as::<_, Minisite>(&sql)
            .bind(project_id)
            .fetch_optional(pool)
            .await
    }
}
