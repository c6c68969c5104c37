//! Chat-completion providers and the completion client for shortscript.
//!
//! The [`CompletionClient`] sends one logical completion per call to an
//! OpenAI-compatible `/chat/completions` endpoint, retrying transport
//! failures with the linear backoff of a
//! [`RetryPolicy`](shortscript_rate_limit::RetryPolicy), and turns the reply
//! into scripts with [`extract_scripts`].
//!
//! HTTP is behind the [`CompletionTransport`] trait so tests can script
//! provider behavior without a network.
//!
//! # Example
//!
//! ```no_run
//! use shortscript_core::GenerationRequest;
//! use shortscript_interface::ScriptGenerator;
//! use shortscript_models::{CompletionClient, HttpTransport, Provider};
//! use shortscript_rate_limit::RetryPolicy;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(Duration::from_secs(120))?;
//! let client = CompletionClient::new(
//!     Provider::DeepSeek,
//!     std::env::var("DEEPSEEK_API_KEY")?,
//!     transport,
//!     RetryPolicy::default(),
//! )?;
//!
//! let request = GenerationRequest::builder()
//!     .source_content("一篇关于专注力的长文……")
//!     .script_count(3)
//!     .build()?;
//! let response = client.generate(&request).await?;
//! for script in &response.scripts {
//!     println!("{}: {}", script.theme, script.content);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod dto;
mod extraction;
mod metrics;
mod provider;
mod transport;

pub use client::{CompletionClient, CompletionText, PING_PROMPT};
pub use dto::{ChatCompletionChoice, ChatCompletionPayload, ChatCompletionResponse, ResponseMessage};
pub use extraction::{Extracted, MISSING_CONTENT_PLACEHOLDER, MissingContentPolicy, extract_scripts};
pub use metrics::{LlmMetrics, classify_error};
pub use provider::{CompletionProvider, Provider};
pub use transport::{CompletionTransport, HttpTransport};
