use std::time::Duration;

use async_trait::async_trait;
use docgen_core::StructuredPrompt;
use thiserror::Error;

use crate::protocol::openai::GenerationResult;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Generation timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, GenerationError>;

/// A remote text-generation engine.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Send one structured prompt and return the raw completion.
    async fn generate(&self, prompt: &StructuredPrompt) -> Result<GenerationResult>;

    /// Model identifier used for requests.
    fn model(&self) -> &str {
        "unknown"
    }
}
