//! Gemini HTTP client implementing the [`LanguageModel`] seam.
//!
//! Documents are pushed through the Files API (multipart upload), then
//! each stage is a single `generateContent` call in JSON mode so the
//! response parses directly into the stage's output shape.

use std::path::Path;

use async_trait::async_trait;
use mirador_core::upload::FileKind;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::draft::{ExtractedContent, ProjectDraft, SeoFields, TranslatedFields};
use crate::error::PipelineError;
use crate::model::LanguageModel;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL_NAME: &str = "gemini-2.0-flash";

/// Client for the Gemini generative-language API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different host (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Upload a document to the Files API and return its `file_uri`.
    async fn upload_file(&self, file_path: &Path, kind: FileKind) -> Result<String, PipelineError> {
        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|e| PipelineError::Extraction(format!("Failed to read upload: {e}")))?;

        let mime = mime_for(kind);

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| PipelineError::Extraction(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let url = format!(
            "{}/upload/v1beta/files?key={}",
            self.base_url, self.api_key
        );
        let response = self.http.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Extraction(format!(
                "File upload returned {status}"
            )));
        }

        let body: serde_json::Value = response.json().await?;
        body.pointer("/file/uri")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                PipelineError::Extraction("File upload response had no file uri".to_string())
            })
    }

    /// Run one `generateContent` call in JSON mode and parse the reply.
    async fn generate_json<T: DeserializeOwned>(
        &self,
        parts: serde_json::Value,
        stage_error: impl Fn(String) -> PipelineError,
    ) -> Result<T, PipelineError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, MODEL_NAME, self.api_key
        );

        let request = json!({
            "contents": [{ "role": "user", "parts": parts }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(stage_error(format!("model API returned {status}")));
        }

        let body: serde_json::Value = response.json().await?;
        let text = body
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .ok_or_else(|| stage_error("model response had no content".to_string()))?;

        serde_json::from_str(text)
            .map_err(|e| stage_error(format!("model returned malformed JSON: {e}")))
    }
}

/// MIME type sent to the Files API for each accepted kind.
fn mime_for(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Pdf => "application/pdf",
        FileKind::Zip => "application/zip",
        FileKind::Ppt => "application/vnd.ms-powerpoint",
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn extract(
        &self,
        file_path: &Path,
        kind: FileKind,
    ) -> Result<ExtractedContent, PipelineError> {
        let file_uri = self.upload_file(file_path, kind).await?;
        let mime = mime_for(kind);

        self.generate_json(
            json!([
                { "fileData": { "fileUri": file_uri, "mimeType": mime } },
                { "text": "Extract the full text of this real-estate marketing document. \
                           Return JSON with fields: text (string), pricing_rows (array of \
                           {unit_type, price_from_aed, size_sqft}), milestones (array of \
                           strings for any construction or payment milestones)." },
            ]),
            PipelineError::Extraction,
        )
        .await
    }

    async fn map_to_draft(
        &self,
        content: &ExtractedContent,
    ) -> Result<ProjectDraft, PipelineError> {
        let prompt = format!(
            "Map this extracted real-estate document onto a project listing. Return JSON \
             with fields: name, description (2-3 sentences), location, units (array of \
             {{unit_type, bedrooms, size_sqft, price_from_aed}}), amenities (array of \
             strings), payment_plan ({{down_payment, during_construction, on_handover, \
             post_handover}} as integer percentages, omitting unknown ones).\n\n{}",
            serde_json::to_string(content).unwrap_or_default()
        );
        self.generate_json(json!([{ "text": prompt }]), PipelineError::Mapping)
            .await
    }

    async fn translate(
        &self,
        draft: &ProjectDraft,
        target_language: &str,
    ) -> Result<TranslatedFields, PipelineError> {
        let prompt = format!(
            "Translate the name and description of this project listing into '{}'. \
             Return JSON with fields: language, name, description.\n\nname: {}\ndescription: {}",
            target_language, draft.name, draft.description
        );
        self.generate_json(json!([{ "text": prompt }]), PipelineError::Translation)
            .await
    }

    async fn generate_seo(&self, draft: &ProjectDraft) -> Result<SeoFields, PipelineError> {
        let prompt = format!(
            "Write SEO metadata for this Dubai real-estate listing. Return JSON with \
             fields: title (max 60 chars), description (max 160 chars).\n\nname: {}\n\
             location: {}\ndescription: {}",
            draft.name,
            draft.location.as_deref().unwrap_or("Dubai"),
            draft.description
        );
        self.generate_json(json!([{ "text": prompt }]), PipelineError::Seo)
            .await
    }
}
