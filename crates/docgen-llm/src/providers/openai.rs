use std::time::Duration;

use async_trait::async_trait;
use docgen_core::config::{
    AppConfig, DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TEMPERATURE,
};
use docgen_core::StructuredPrompt;
use reqwest::{Client, StatusCode};

use crate::protocol::openai::{build_chat_body, GenerationResult};
use crate::provider::{GenerationError, GenerationProvider, Result};

/// Chat-completions client for OpenAI-compatible endpoints.
///
/// The API key is captured once at construction. A missing key is not an
/// error until the first call to [`GenerationProvider::generate`].
pub struct OpenAIProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

impl OpenAIProvider {
    pub fn new(api_key: Option<String>) -> Self {
        if api_key.is_none() {
            log::warn!("No API key configured; generation requests will fail until one is set");
        }
        let timeout = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);
        Self {
            client: build_client(timeout),
            api_key,
            base_url: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_base_url(config.api_base.clone())
            .with_model(config.model.clone())
            .with_temperature(config.temperature)
            .with_timeout(Duration::from_secs(config.request_timeout_secs))
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.client = build_client(timeout);
        self
    }

    fn map_send_error(&self, err: reqwest::Error) -> GenerationError {
        if err.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Http(err)
        }
    }
}

fn build_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        log::warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
        Client::new()
    })
}

#[async_trait]
impl GenerationProvider for OpenAIProvider {
    async fn generate(&self, prompt: &StructuredPrompt) -> Result<GenerationResult> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GenerationError::Auth("missing API key; set OPENAI_API_KEY".to_string())
        })?;

        let body = build_chat_body(&self.model, prompt, self.temperature);
        log::debug!(
            "Sending {} message(s) to {} (model: {})",
            prompt.len(),
            self.base_url,
            self.model
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    GenerationError::Auth(format!("HTTP {}: {}", status, text))
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    GenerationError::RateLimited(format!("HTTP {}: {}", status, text))
                }
                _ => GenerationError::Api(format!("HTTP {}: {}", status, text)),
            });
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        log::debug!("Received {} byte completion body", body.len());
        Ok(GenerationResult::from_body(body))
    }

    fn model(&self) -> &str {
        &self.model
    }
}
