//! HTTP transport for chat completions.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;
use shortscript_error::{
    ConfigError, GenerationError, GenerationErrorKind, GenerationResult, ShortscriptError,
    ShortscriptResult,
};
use std::time::Duration;
use tracing::{debug, instrument};

/// Sends one JSON POST and returns the decoded JSON body.
///
/// Implementations classify failures: network errors, timeouts (including
/// while reading the body) and non-2xx statuses are `Transport` errors; a
/// complete 2xx body that is not JSON is `InvalidResponseShape`.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    /// POST `body` to `endpoint` with the given headers.
    async fn post_json(
        &self,
        endpoint: &str,
        headers: HeaderMap,
        body: &Value,
    ) -> GenerationResult<Value>;
}

/// reqwest-backed transport with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be initialized.
    pub fn new(timeout: Duration) -> ShortscriptResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ShortscriptError::from(ConfigError::new(format!(
                "Failed to build HTTP client: {}",
                e
            )))
        })?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CompletionTransport for HttpTransport {
    #[instrument(skip(self, headers, body))]
    async fn post_json(
        &self,
        endpoint: &str,
        headers: HeaderMap,
        body: &Value,
    ) -> GenerationResult<Value> {
        debug!("Sending chat completion request");

        let response = self
            .client
            .post(endpoint)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::transport(None, format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GenerationError::transport(Some(status.as_u16()), error_text));
        }

        // A body cut short by a timeout or reset is a transport failure, not a shape error.
        let body = response.bytes().await.map_err(|e| {
            GenerationError::transport(None, format!("Failed to read response body: {}", e))
        })?;

        serde_json::from_slice::<Value>(&body).map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidResponseShape(format!(
                "Response body is not JSON: {}",
                e
            )))
        })
    }
}
