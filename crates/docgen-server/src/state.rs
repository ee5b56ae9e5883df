use std::sync::Arc;

use docgen_core::{AppConfig, ConfigError};
use docgen_pipeline::DocumentationPipeline;

pub struct AppState {
    pub pipeline: Arc<DocumentationPipeline>,
}

impl AppState {
    pub fn new(pipeline: DocumentationPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Build the shared pipeline. Fails when the policy cannot be loaded.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        log::info!(
            "Creating pipeline with base URL: {} and model: {}",
            config.api_base,
            config.model
        );
        Ok(Self::new(DocumentationPipeline::from_config(config)?))
    }
}
