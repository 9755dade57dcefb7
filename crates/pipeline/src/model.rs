//! Seam between the orchestrator and the AI provider.
//!
//! The pipeline only talks to the model through this trait;
//! [`GeminiClient`](crate::gemini::GeminiClient) is the production
//! implementation and tests substitute their own.

use std::path::Path;

use async_trait::async_trait;
use mirador_core::upload::FileKind;

use crate::draft::{ExtractedContent, ProjectDraft, SeoFields, TranslatedFields};
use crate::error::PipelineError;

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Extract text, pricing tables and milestones from an uploaded
    /// document.
    async fn extract(
        &self,
        file_path: &Path,
        kind: FileKind,
    ) -> Result<ExtractedContent, PipelineError>;

    /// Map extracted content onto the structured project schema.
    async fn map_to_draft(
        &self,
        content: &ExtractedContent,
    ) -> Result<ProjectDraft, PipelineError>;

    /// Translate the headline fields into the target language.
    async fn translate(
        &self,
        draft: &ProjectDraft,
        target_language: &str,
    ) -> Result<TranslatedFields, PipelineError>;

    /// Generate SEO metadata for the listing.
    async fn generate_seo(&self, draft: &ProjectDraft) -> Result<SeoFields, PipelineError>;
}
