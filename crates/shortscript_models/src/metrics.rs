//! Metrics for completion calls.
//!
//! OpenTelemetry instruments for requests, failures, latency and token usage.
//! Without an installed meter provider every instrument is a no-op.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use shortscript_core::TokenUsage;
use shortscript_error::GenerationErrorKind;
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Metrics for chat-completion calls, labeled by provider and model.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// HTTP attempts that returned a completion
    pub requests: Counter<u64>,
    /// HTTP attempts that failed
    pub errors: Counter<u64>,
    /// Attempt duration in seconds
    pub duration: Histogram<f64>,
    /// Completions that fell back to raw text
    pub fallbacks: Counter<u64>,
    /// Total tokens used (prompt + completion)
    pub tokens_used: Counter<u64>,
    /// Prompt tokens used
    pub prompt_tokens: Counter<u64>,
    /// Completion tokens used
    pub completion_tokens: Counter<u64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("shortscript_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Completion attempts that succeeded")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Completion attempts that failed")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("seconds")
                .with_description("Completion attempt duration")
                .build(),
            fallbacks: meter
                .u64_counter("llm.fallbacks")
                .with_description("Completions wrapped as a single raw-text script")
                .build(),
            tokens_used: meter
                .u64_counter("llm.tokens")
                .with_description("Total tokens used (prompt + completion)")
                .build(),
            prompt_tokens: meter
                .u64_counter("llm.tokens.prompt")
                .with_description("Prompt tokens used")
                .build(),
            completion_tokens: meter
                .u64_counter("llm.tokens.completion")
                .with_description("Completion tokens used")
                .build(),
        }
    }

    /// Get the global metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a successful attempt.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed attempt.
    pub fn record_error(&self, provider: &str, model: &str, error_type: &'static str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_type),
        ];
        self.errors.add(1, labels);
    }

    /// Record a completion that could not be parsed into scripts.
    pub fn record_fallback(&self, provider: &str, model: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.fallbacks.add(1, labels);
    }

    /// Record token usage from a completion.
    pub fn record_tokens(&self, model: &str, usage: &TokenUsage) {
        let labels = &[KeyValue::new("model", model.to_string())];
        self.tokens_used.add(usage.total_tokens, labels);
        self.prompt_tokens.add(usage.prompt_tokens, labels);
        self.completion_tokens.add(usage.completion_tokens, labels);
    }
}

impl Default for LlmMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}

/// Classify an error for metrics labeling.
///
/// Returns one of: "rate_limit", "auth", "server", "http", "network",
/// "invalid_response", "missing_credential", "invalid_request", "exhausted".
///
/// # Examples
///
/// ```
/// use shortscript_error::GenerationErrorKind;
/// use shortscript_models::classify_error;
///
/// let kind = GenerationErrorKind::Transport { status: Some(429), message: String::new() };
/// assert_eq!(classify_error(&kind), "rate_limit");
/// ```
pub fn classify_error(kind: &GenerationErrorKind) -> &'static str {
    match kind {
        GenerationErrorKind::Transport { status: None, .. } => "network",
        GenerationErrorKind::Transport {
            status: Some(code), ..
        } => match code {
            429 => "rate_limit",
            401 | 403 => "auth",
            500..=599 => "server",
            _ => "http",
        },
        GenerationErrorKind::InvalidResponseShape(_) => "invalid_response",
        GenerationErrorKind::MissingCredential(_) => "missing_credential",
        GenerationErrorKind::InvalidRequest(_) => "invalid_request",
        GenerationErrorKind::RetriesExhausted { .. } => "exhausted",
    }
}
