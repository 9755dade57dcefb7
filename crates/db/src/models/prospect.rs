//! Models for uploaded prospect documents.

use mirador_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `prospects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Prospect {
    pub id: DbId,
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
    pub status: String,
    pub generated_title: Option<String>,
    pub generated_description: Option<String>,
    pub generated_sections: Option<serde_json::Value>,
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new prospect after a validated upload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProspect {
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
}
