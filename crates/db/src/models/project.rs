//! Models for generated project listings.

use mirador_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub prospect_id: Option<DbId>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub location: Option<String>,
    pub pricing: serde_json::Value,
    pub units: serde_json::Value,
    pub amenities: serde_json::Value,
    pub payment_plan: serde_json::Value,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting (or refreshing) a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub prospect_id: Option<DbId>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub location: Option<String>,
    pub pricing: serde_json::Value,
    pub units: serde_json::Value,
    pub amenities: serde_json::Value,
    pub payment_plan: serde_json::Value,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}
