//! OpenAI chat-completions request and response types.

use docgen_core::{Message, StructuredPrompt};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub temperature: f32,
    pub stream: bool,
}

pub fn build_chat_body<'a>(
    model: &'a str,
    prompt: &'a StructuredPrompt,
    temperature: f32,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages: prompt.messages(),
        temperature,
        stream: false,
    }
}

/// Raw completion body returned by the generation engine.
///
/// The body is kept unparsed; [`crate::OutputNormalizer`] decides whether it
/// holds usable text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    body: String,
}

impl GenerationResult {
    pub fn from_body(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// A single-choice chat completion carrying `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        let text: String = text.into();
        let body = serde_json::json!({
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }]
        });
        Self::from_body(body.to_string())
    }

    pub fn parse(&self) -> serde_json::Result<ChatCompletion> {
        serde_json::from_str(&self.body)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletion {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub message: ResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
