//! Provider capability and built-in OpenAI-compatible providers.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use shortscript_error::{
    ConfigError, GenerationError, GenerationErrorKind, GenerationResult, ShortscriptResult,
};
use shortscript_rate_limit::ProviderSettings;
use std::str::FromStr;

/// What the completion client needs to know about a chat-completion vendor.
pub trait CompletionProvider: Send + Sync {
    /// Provider name used in logs and metrics (e.g., "deepseek").
    fn name(&self) -> &str;

    /// Full URL of the chat-completions endpoint.
    fn endpoint(&self) -> &str;

    /// Request headers for the given API key.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the key cannot be sent as a header value.
    fn build_headers(&self, api_key: &str) -> GenerationResult<HeaderMap>;

    /// Models known to work with this provider.
    fn supported_models(&self) -> Vec<&str>;

    /// Model used when none is configured.
    fn default_model(&self) -> &str;

    /// Name of the credential that holds the API key (e.g., "DEEPSEEK_API_KEY").
    fn credential_key(&self) -> &str;
}

/// Supported chat-completion providers.
///
/// Built-in providers parse from their configuration name:
///
/// ```
/// use shortscript_models::{CompletionProvider, Provider};
///
/// let provider: Provider = "groq".parse().unwrap();
/// assert_eq!(provider, Provider::Groq);
/// assert_eq!(provider.credential_key(), "GROQ_API_KEY");
/// assert_eq!(Provider::default().default_model(), "deepseek-chat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Provider {
    /// DeepSeek chat API
    #[default]
    DeepSeek,
    /// OpenAI chat API
    OpenAi,
    /// Groq OpenAI-compatible API
    Groq,
    /// Any other OpenAI-compatible endpoint
    #[strum(disabled)]
    Custom {
        /// Provider name
        name: String,
        /// Chat-completions URL
        endpoint: String,
        /// Model identifier
        model: String,
        /// Credential name for the API key
        credential_key: String,
    },
}

impl Provider {
    /// Select a provider from the `[provider]` configuration section.
    ///
    /// A configured `endpoint` always selects a custom provider. Otherwise the
    /// name must be one of the built-in providers.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown provider name, or for a
    /// custom endpoint without a model.
    pub fn from_settings(settings: &ProviderSettings) -> ShortscriptResult<Self> {
        if let Some(endpoint) = &settings.endpoint {
            let model = settings.model.clone().ok_or_else(|| {
                ConfigError::new(format!(
                    "Custom provider '{}' needs a model",
                    settings.name
                ))
            })?;
            let credential_key = settings
                .credential_key
                .clone()
                .unwrap_or_else(|| format!("{}_API_KEY", settings.name.to_uppercase()));
            return Ok(Provider::Custom {
                name: settings.name.clone(),
                endpoint: endpoint.clone(),
                model,
                credential_key,
            });
        }

        Provider::from_str(&settings.name).map_err(|_| {
            ConfigError::new(format!(
                "Unknown provider '{}' (expected deepseek, openai or groq, or set an endpoint)",
                settings.name
            ))
            .into()
        })
    }
}

impl CompletionProvider for Provider {
    fn name(&self) -> &str {
        match self {
            Provider::DeepSeek => "deepseek",
            Provider::OpenAi => "openai",
            Provider::Groq => "groq",
            Provider::Custom { name, .. } => name,
        }
    }

    fn endpoint(&self) -> &str {
        match self {
            Provider::DeepSeek => "https://api.deepseek.com/v1/chat/completions",
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
            Provider::Groq => "https://api.groq.com/openai/v1/chat/completions",
            Provider::Custom { endpoint, .. } => endpoint,
        }
    }

    fn build_headers(&self, api_key: &str) -> GenerationResult<HeaderMap> {
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|_| {
            GenerationError::new(GenerationErrorKind::InvalidRequest(format!(
                "{} contains characters not allowed in an HTTP header",
                self.credential_key()
            )))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn supported_models(&self) -> Vec<&str> {
        match self {
            Provider::DeepSeek => vec!["deepseek-chat", "deepseek-reasoner"],
            Provider::OpenAi => vec!["gpt-4o-mini", "gpt-4o"],
            Provider::Groq => vec!["llama-3.1-8b-instant", "llama-3.3-70b-versatile"],
            Provider::Custom { model, .. } => vec![model.as_str()],
        }
    }

    fn default_model(&self) -> &str {
        match self {
            Provider::DeepSeek => "deepseek-chat",
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Groq => "llama-3.1-8b-instant",
            Provider::Custom { model, .. } => model,
        }
    }

    fn credential_key(&self) -> &str {
        match self {
            Provider::DeepSeek => "DEEPSEEK_API_KEY",
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
            Provider::Custom { credential_key, .. } => credential_key,
        }
    }
}
