//! Repository for generated project listings.

use mirador_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project};

/// Column list for `projects`.
const PROJECT_COLUMNS: &str = "id, prospect_id, name, slug, description, location, pricing, \
     units, amenities, payment_plan, seo_title, seo_description, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let sql = format!(
            "INSERT INTO projects \
                (prospect_id, name, slug, description, location, pricing, units, \
                 amenities, payment_plan, seo_title, seo_description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(input.prospect_id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.pricing)
            .bind(&input.units)
            .bind(&input.amenities)
            .bind(&input.payment_plan)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .fetch_one(pool)
            .await
    }

    /// Refresh an existing project's generated fields, keeping its slug.
    pub async fn update_generated(
        pool: &PgPool,
        id: DbId,
        input: &CreateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let sql = format!(
            "UPDATE projects SET \
                name = $2, description = $3, location = $4, pricing = $5, \
                units = $6, amenities = $7, payment_plan = $8, \
                seo_title = $9, seo_description = $10, updated_at = now() \
             WHERE id = $1 \
             RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(&input.pricing)
            .bind(&input.units)
            .bind(&input.amenities)
            .bind(&input.payment_plan)
            .bind(&input.seo_title)
            .bind(&input.seo_description)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by its slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Project>, sqlx::Error> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE slug = $1");
        sqlx::query_as::<_, Project>(&sql)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find the project generated from a given prospect, if any.
    pub async fn find_by_prospect(
        pool: &PgPool,
        prospect_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE prospect_id = $1");
        sqlx::query_as::<_, Project>(&sql)
            .bind(prospect_id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, Project>(&sql).fetch_all(pool).await
    }

    /// Whether a slug is already taken.
    pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM projects WHERE slug = $1)")
                .bind(slug)
                .fetch_one(pool)
                .await?;
        Ok(exists.0)
    }
}
