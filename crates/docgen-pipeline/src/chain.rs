use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use docgen_core::{PromptTemplate, Request};
use docgen_llm::{GenerationError, GenerationProvider, OutputNormalizer};

use crate::error::Result;
use crate::runnable::Runnable;

/// Template → generation → normalization, with no policy checks.
pub struct DocumentationChain {
    template: PromptTemplate,
    provider: Arc<dyn GenerationProvider>,
    normalizer: OutputNormalizer,
    timeout: Option<Duration>,
}

impl DocumentationChain {
    pub fn new(template: PromptTemplate, provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            template,
            provider,
            normalizer: OutputNormalizer::new(),
            timeout: None,
        }
    }

    /// Bound each generation call; expiry surfaces as [`GenerationError::Timeout`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn provider(&self) -> &Arc<dyn GenerationProvider> {
        &self.provider
    }
}

#[async_trait]
impl Runnable for DocumentationChain {
    async fn invoke(&self, request: Request) -> Result<String> {
        let prompt = self.template.render(&request)?;

        let generation = self.provider.generate(&prompt);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, generation)
                .await
                .map_err(|_| GenerationError::Timeout(limit))??,
            None => generation.await?,
        };

        Ok(self.normalizer.normalize(&result)?)
    }
}
