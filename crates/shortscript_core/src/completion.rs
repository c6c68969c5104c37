//! Completion request and usage types.

use crate::{ChatMessage, Role};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shortscript_error::{GenerationError, GenerationErrorKind, GenerationResult};

/// One chat-completion call: model, the two prompts and sampling settings.
///
/// Owned by the completion client for the duration of a single call.
///
/// # Examples
///
/// ```
/// use shortscript_core::{CompletionRequest, Role};
///
/// let request = CompletionRequest::new("deepseek-chat", "persona", "task", 0.7, 4000).unwrap();
/// let messages = request.messages();
/// assert_eq!(messages[0].role, Role::System);
/// assert_eq!(messages[1].content, "task");
///
/// assert!(CompletionRequest::new("deepseek-chat", "persona", "task", 2.5, 4000).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct CompletionRequest {
    /// Model identifier
    model: String,
    /// Persona text sent as the system message
    system_prompt: String,
    /// Task text sent as the user message
    user_prompt: String,
    /// Sampling temperature in [0, 2]
    temperature: f32,
    /// Upper bound on generated tokens
    max_tokens: u32,
}

impl CompletionRequest {
    /// Create a validated completion request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the model is blank, the temperature lies
    /// outside [0, 2] or `max_tokens` is zero.
    #[track_caller]
    pub fn new(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
        temperature: f32,
        max_tokens: u32,
    ) -> GenerationResult<Self> {
        let model = model.into();
        if model.trim().is_empty() {
            return Err(invalid("model must not be empty"));
        }
        if !(0.0..=2.0).contains(&temperature) {
            return Err(invalid(format!(
                "temperature must be in [0, 2], got {}",
                temperature
            )));
        }
        if max_tokens == 0 {
            return Err(invalid("max_tokens must be positive"));
        }

        Ok(Self {
            model,
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            temperature,
            max_tokens,
        })
    }

    /// Messages in wire order: system first, then user.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::new(Role::System, self.system_prompt.clone()),
            ChatMessage::new(Role::User, self.user_prompt.clone()),
        ]
    }
}

#[track_caller]
fn invalid(message: impl Into<String>) -> GenerationError {
    GenerationError::new(GenerationErrorKind::InvalidRequest(message.into()))
}

/// Token accounting reported by the provider's `usage` object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    #[serde(default)]
    pub prompt_tokens: u64,
    /// Tokens generated
    #[serde(default)]
    pub completion_tokens: u64,
    /// Sum reported by the provider
    #[serde(default)]
    pub total_tokens: u64,
}
