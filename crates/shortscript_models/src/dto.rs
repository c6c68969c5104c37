//! Wire types for OpenAI-compatible chat completions.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shortscript_core::{ChatMessage, CompletionRequest, TokenUsage};

/// Request body sent to `/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ChatCompletionPayload {
    /// Model identifier
    model: String,
    /// Conversation, system message first
    messages: Vec<ChatMessage>,
    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Upper bound on generated tokens
    max_tokens: u32,
}

impl ChatCompletionPayload {
    /// Payload with explicit messages.
    pub fn new(
        model: impl Into<String>,
        messages: Vec<ChatMessage>,
        temperature: Option<f32>,
        max_tokens: u32,
    ) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
            max_tokens,
        }
    }
}

impl From<&CompletionRequest> for ChatCompletionPayload {
    fn from(request: &CompletionRequest) -> Self {
        Self::new(
            request.model(),
            request.messages(),
            Some(*request.temperature()),
            *request.max_tokens(),
        )
    }
}

/// Response body returned by `/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Candidate replies
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
    /// Token accounting, when reported
    #[serde(default)]
    pub usage: Option<TokenUsage>,
    /// Model that served the request
    #[serde(default)]
    pub model: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the provider returned one.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

/// One candidate reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    /// The reply message
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Assistant message inside a choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Reply text
    #[serde(default)]
    pub content: Option<String>,
}
