//! The prospect processing pipeline.
//!
//! Runs the extraction → mapping → translation → SEO → persistence
//! sequence for one prospect, emitting progress over
//! [`ProgressChannels`](mirador_events::ProgressChannels) as it
//! advances. Failures move the prospect to `failed` and surface a
//! terminal `error` event; there is no automatic retry — reprocessing
//! is a manual admin action.

pub mod draft;
pub mod env;
pub mod error;
pub mod gemini;
pub mod materialize;
pub mod model;
pub mod orchestrator;

pub use env::PipelineEnv;
pub use error::PipelineError;
pub use gemini::GeminiClient;
pub use model::LanguageModel;
pub use orchestrator::{Pipeline, ProcessOutcome};
