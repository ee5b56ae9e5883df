use std::sync::Arc;
use std::time::Duration;

use docgen_core::{AppConfig, ConfigError, PolicyEngine, PromptTemplate, Request, RuleEngine};
use docgen_llm::{GenerationProvider, OpenAIProvider};

use crate::chain::DocumentationChain;
use crate::error::Result;
use crate::gate::PolicyGate;
use crate::response::Response;

/// Policy gate around the documentation chain, built once and shared by
/// every request. Holds no mutable state, so concurrent `run` calls are safe.
pub struct DocumentationPipeline {
    gate: PolicyGate<DocumentationChain>,
}

impl DocumentationPipeline {
    pub fn builder(
        engine: Arc<dyn PolicyEngine>,
        provider: Arc<dyn GenerationProvider>,
    ) -> PipelineBuilder {
        PipelineBuilder::new(engine, provider)
    }

    /// Load the policy configuration and construct the generation client.
    /// A missing or malformed policy is returned as an error and should stop
    /// the process; a missing API key only fails on the first generation.
    pub fn from_config(config: &AppConfig) -> std::result::Result<Self, ConfigError> {
        let engine = RuleEngine::from_path(&config.policy_path)?;
        let provider = OpenAIProvider::from_config(config);

        Ok(Self::builder(Arc::new(engine), Arc::new(provider))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build())
    }

    pub async fn run(&self, request: Request) -> Result<Response> {
        self.gate.run(request).await
    }

    pub async fn generate_documentation(&self, function_text: &str) -> Result<Response> {
        self.run(Request::new(function_text)).await
    }

    pub fn model(&self) -> &str {
        self.gate.inner().provider().model()
    }
}

pub struct PipelineBuilder {
    engine: Arc<dyn PolicyEngine>,
    provider: Arc<dyn GenerationProvider>,
    template: PromptTemplate,
    timeout: Option<Duration>,
}

impl PipelineBuilder {
    pub fn new(engine: Arc<dyn PolicyEngine>, provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            engine,
            provider,
            template: PromptTemplate::documentation(),
            timeout: None,
        }
    }

    pub fn template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> DocumentationPipeline {
        let mut chain = DocumentationChain::new(self.template, self.provider);
        if let Some(timeout) = self.timeout {
            chain = chain.with_timeout(timeout);
        }
        DocumentationPipeline {
            gate: PolicyGate::new(self.engine, chain),
        }
    }
}
