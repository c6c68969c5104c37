//! The retrying completion client.

use crate::{
    ChatCompletionPayload, ChatCompletionResponse, CompletionProvider, CompletionTransport,
    LlmMetrics, MissingContentPolicy, Provider, classify_error, extract_scripts,
};
use async_trait::async_trait;
use serde_json::Value;
use shortscript_core::{
    ChatMessage, CompletionRequest, GenerationRequest, GenerationResponse, Role, TokenUsage,
};
use shortscript_error::{
    GenerationError, GenerationErrorKind, GenerationResult, RetryableError, ShortscriptResult,
};
use shortscript_interface::{CredentialSource, ScriptGenerator};
use shortscript_prompt::{ModelSettings, PromptBuilder};
use shortscript_rate_limit::RetryPolicy;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::time::Instant;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, error, info, instrument, warn};

/// Prompt sent by [`CompletionClient::ping`].
pub const PING_PROMPT: &str = "Say \"API connection successful\" in Chinese";

const PING_MAX_TOKENS: u32 = 50;

/// Raw text of one completion and how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionText {
    /// `choices[0].message.content`
    pub text: String,
    /// HTTP attempts made, including the successful one
    pub attempts: u32,
    /// Model that served the request
    pub model: String,
    /// Token usage, when reported
    pub usage: Option<TokenUsage>,
}

struct ParsedCompletion {
    text: String,
    model: Option<String>,
    usage: Option<TokenUsage>,
}

/// Chat-completion client for one provider and API key.
///
/// Each call is independent: a fresh attempt counter is created per call and
/// nothing is carried over between calls. Transport failures are retried per
/// the [`RetryPolicy`]; a reply without `choices[0].message.content` fails the
/// call immediately.
pub struct CompletionClient<T> {
    provider: Provider,
    api_key: String,
    transport: T,
    policy: RetryPolicy,
    prompts: PromptBuilder,
    settings: ModelSettings,
    missing_content: MissingContentPolicy,
}

impl<T: CompletionTransport> CompletionClient<T> {
    /// Create a client with an explicit API key.
    ///
    /// Model settings default to the provider's default model, temperature
    /// 0.7 and 4000 max tokens.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` if the key is blank.
    pub fn new(
        provider: Provider,
        api_key: impl Into<String>,
        transport: T,
        policy: RetryPolicy,
    ) -> GenerationResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MissingCredential(
                provider.credential_key().to_string(),
            )));
        }

        let defaults = ModelSettings::default();
        let settings = ModelSettings::new(
            provider.default_model(),
            *defaults.temperature(),
            *defaults.max_tokens(),
        );
        Ok(Self {
            provider,
            api_key,
            transport,
            policy,
            prompts: PromptBuilder::default(),
            settings,
            missing_content: MissingContentPolicy::default(),
        })
    }

    /// Create a client, reading the API key from a credential source.
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` naming the provider's credential key when
    /// the source has no value for it or the value is blank.
    #[instrument(skip(credentials, transport), fields(provider = %provider.name()))]
    pub fn from_credentials(
        provider: Provider,
        credentials: &dyn CredentialSource,
        transport: T,
        policy: RetryPolicy,
    ) -> GenerationResult<Self> {
        let key_name = provider.credential_key();
        let Some(api_key) = credentials
            .get(key_name)
            .filter(|key| !key.trim().is_empty())
        else {
            error!(credential = key_name, "API key is not configured");
            return Err(GenerationError::new(GenerationErrorKind::MissingCredential(
                key_name.to_string(),
            )));
        };
        Self::new(provider, api_key, transport, policy)
    }

    /// Replace the prompt builder used by [`ScriptGenerator::generate`].
    pub fn with_prompt_builder(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// Replace the model and sampling settings.
    pub fn with_model_settings(mut self, settings: ModelSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Choose how array elements without content are handled.
    pub fn with_missing_content(mut self, policy: MissingContentPolicy) -> Self {
        self.missing_content = policy;
        self
    }

    /// The provider this client talks to.
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// The retry policy applied to every call.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Model and sampling settings used for generation.
    pub fn model_settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// Run one logical completion and return the raw reply text.
    ///
    /// # Errors
    ///
    /// - `InvalidResponseShape` if the reply lacks `choices[0].message.content`
    /// - `RetriesExhausted` if every attempt failed in transport
    #[instrument(skip(self, request), fields(provider = %self.provider.name(), model = %request.model()))]
    pub async fn complete(&self, request: &CompletionRequest) -> GenerationResult<CompletionText> {
        self.send(&ChatCompletionPayload::from(request)).await
    }

    /// Run one logical completion and extract scripts from the reply.
    ///
    /// A reply that is not a usable JSON array becomes one fallback script;
    /// that is not an error.
    ///
    /// # Errors
    ///
    /// Same as [`complete`](Self::complete).
    #[instrument(skip(self, request), fields(provider = %self.provider.name(), model = %request.model()))]
    pub async fn generate_scripts(
        &self,
        request: &CompletionRequest,
    ) -> GenerationResult<GenerationResponse> {
        let completion = self.complete(request).await?;
        let extracted = extract_scripts(&completion.text, self.missing_content);

        if extracted.used_fallback {
            warn!(
                response_length = completion.text.len(),
                "Completion was not a usable JSON array, returning raw text"
            );
            LlmMetrics::get().record_fallback(self.provider.name(), &completion.model);
        }
        info!(
            scripts = extracted.scripts.len(),
            attempts = completion.attempts,
            "Generated scripts"
        );

        Ok(GenerationResponse {
            scripts: extracted.scripts,
            attempts: completion.attempts,
            used_fallback: extracted.used_fallback,
            model: completion.model,
            usage: completion.usage,
        })
    }

    /// Check connectivity and credentials with a tiny completion.
    ///
    /// # Errors
    ///
    /// Same as [`complete`](Self::complete).
    #[instrument(skip(self), fields(provider = %self.provider.name()))]
    pub async fn ping(&self) -> GenerationResult<String> {
        let payload = ChatCompletionPayload::new(
            self.settings.model(),
            vec![ChatMessage::new(Role::User, PING_PROMPT)],
            None,
            PING_MAX_TOKENS,
        );
        let completion = self.send(&payload).await?;
        Ok(completion.text)
    }

    async fn send(&self, payload: &ChatCompletionPayload) -> GenerationResult<CompletionText> {
        let body = serde_json::to_value(payload).map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidRequest(format!(
                "Failed to encode request: {}",
                e
            )))
        })?;
        let headers = self.provider.build_headers(&self.api_key)?;

        let provider = self.provider.name();
        let endpoint = self.provider.endpoint();
        let model = payload.model().as_str();
        let max_attempts = self.policy.max_attempts();
        let metrics = LlmMetrics::get();
        let attempt_counter = AtomicU32::new(0);

        let outcome = Retry::spawn(self.policy.backoff(), || {
            let attempt = attempt_counter.fetch_add(1, Ordering::SeqCst) + 1;
            let headers = headers.clone();
            let body = &body;
            async move {
                debug!(attempt, max_attempts, "Sending completion attempt");
                let started = Instant::now();

                let result = self
                    .transport
                    .post_json(endpoint, headers, body)
                    .await
                    .and_then(parse_completion);

                match result {
                    Ok(parsed) => {
                        metrics.record_request(provider, model, started.elapsed().as_secs_f64());
                        Ok(parsed)
                    }
                    Err(e) => {
                        metrics.record_error(provider, model, classify_error(&e.kind));
                        if e.is_retryable() {
                            warn!(attempt, max_attempts, error = %e, "Transient provider error");
                            Err(RetryError::Transient {
                                err: e,
                                retry_after: None,
                            })
                        } else {
                            warn!(attempt, error = %e, "Permanent provider error, failing immediately");
                            Err(RetryError::Permanent(e))
                        }
                    }
                }
            }
        })
        .await;

        let attempts = attempt_counter.load(Ordering::SeqCst);
        match outcome {
            Ok(parsed) => {
                if let Some(usage) = &parsed.usage {
                    metrics.record_tokens(model, usage);
                }
                debug!(attempts, "Completion received");
                Ok(CompletionText {
                    text: parsed.text,
                    attempts,
                    model: parsed.model.unwrap_or_else(|| model.to_string()),
                    usage: parsed.usage,
                })
            }
            Err(e) if e.is_retryable() => {
                error!(attempts, error = %e, "Retries exhausted");
                Err(GenerationError::new(GenerationErrorKind::RetriesExhausted {
                    attempts,
                    last: Box::new(e.kind),
                }))
            }
            Err(e) => Err(e),
        }
    }
}

fn parse_completion(value: Value) -> GenerationResult<ParsedCompletion> {
    let response: ChatCompletionResponse = serde_json::from_value(value).map_err(|e| {
        GenerationError::new(GenerationErrorKind::InvalidResponseShape(format!(
            "Unexpected completion payload: {}",
            e
        )))
    })?;

    let text = response
        .first_content()
        .ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::InvalidResponseShape(
                "missing choices[0].message.content".to_string(),
            ))
        })?
        .to_string();

    Ok(ParsedCompletion {
        text,
        model: response.model,
        usage: response.usage,
    })
}

#[async_trait]
impl<T: CompletionTransport> ScriptGenerator for CompletionClient<T> {
    #[instrument(skip(self, request), fields(provider = %self.provider.name()))]
    async fn generate(&self, request: &GenerationRequest) -> ShortscriptResult<GenerationResponse> {
        let completion = self.prompts.completion_request(request, &self.settings)?;
        Ok(self.generate_scripts(&completion).await?)
    }

    fn provider_name(&self) -> &str {
        self.provider.name()
    }

    fn model_name(&self) -> &str {
        self.settings.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_rejects_missing_choices() {
        let err = parse_completion(json!({"choices": []})).err().unwrap();
        assert!(matches!(err.kind, GenerationErrorKind::InvalidResponseShape(_)));
    }

    #[test]
    fn parse_rejects_non_string_content() {
        let err = parse_completion(json!({"choices": [{"message": {"content": 42}}]}))
            .err()
            .unwrap();
        assert!(matches!(err.kind, GenerationErrorKind::InvalidResponseShape(_)));
    }

    #[test]
    fn parse_keeps_usage_and_model() {
        let parsed = parse_completion(json!({
            "model": "deepseek-chat",
            "choices": [{"message": {"content": "[]"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }))
        .unwrap();
        assert_eq!(parsed.text, "[]");
        assert_eq!(parsed.model.as_deref(), Some("deepseek-chat"));
        assert_eq!(parsed.usage.unwrap().total_tokens, 12);
    }
}
