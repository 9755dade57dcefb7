use mirador_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Missing required environment variable: {name}")]
    MissingEnv { name: &'static str },

    #[error("Prospect {0} not found")]
    ProspectNotFound(DbId),

    #[error("Prospect {id} has an unrecognized file type '{file_type}'")]
    UnknownFileType { id: DbId, file_type: String },

    #[error("Prospect {id} has no generated content; run processing first")]
    NoGeneratedContent { id: DbId },

    #[error("Document extraction failed: {0}")]
    Extraction(String),

    #[error("Field mapping failed: {0}")]
    Mapping(String),

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("SEO generation failed: {0}")]
    Seo(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Model API request failed: {0}")]
    Http(#[from] reqwest::Error),
}
