//! Fail-fast environment preconditions for a pipeline run.
//!
//! A run needs the model API key and the database URL; a missing (or
//! empty) variable fails the run immediately with the variable's name
//! in the error, before any extraction is attempted.

use crate::error::PipelineError;

pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_DATABASE_PUBLIC_URL: &str = "DATABASE_PUBLIC_URL";

/// Resolved environment for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineEnv {
    pub google_api_key: String,
    pub database_public_url: String,
}

impl PipelineEnv {
    /// Read the required variables from the process environment.
    pub fn require() -> Result<Self, PipelineError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the required variables via an arbitrary lookup.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, PipelineError> {
        let google_api_key = required(&lookup, ENV_GOOGLE_API_KEY)?;
        let database_public_url = required(&lookup, ENV_DATABASE_PUBLIC_URL)?;
        Ok(Self {
            google_api_key,
            database_public_url,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, PipelineError> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PipelineError::MissingEnv { name }),
    }
}
