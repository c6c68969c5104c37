//! Shortscript - short-video scripts from long-form content
//!
//! Shortscript turns an article, transcript or notes into several Chinese
//! short-video scripts through an OpenAI-compatible chat-completion API.
//! It extracts distinct themes, writes one spoken-style script per theme,
//! and can tailor the result to a narration style and a target platform.
//!
//! # Features
//!
//! - **Prompt building**: deterministic prompts with source truncation, reference materials,
//!   and style/platform modifiers
//! - **Resilient completion**: linear-backoff retry of transport failures with a typed error taxonomy
//! - **Tolerant extraction**: JSON arrays found inside prose, with a single-script fallback
//! - **Batch processing**: a paced queue runner with per-item failure isolation
//! - **Export**: Markdown documents and a notifier for finished batches
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use shortscript::{GenerationRequest, ScriptGenerator, ShortscriptConfig, EnvCredentials, client_from_config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ShortscriptConfig::load()?;
//!     let client = client_from_config(&config, &EnvCredentials)?;
//!
//!     let request = GenerationRequest::builder()
//!         .source_content("一篇关于时间管理的长文……")
//!         .script_count(3)
//!         .style("storytelling")
//!         .platform("douyin")
//!         .build()?;
//!
//!     let response = client.generate(&request).await?;
//!     for script in &response.scripts {
//!         println!("{}\n{}\n", script.theme, script.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry tracing and metrics with the stdout exporter
//! - `api` - run tests that call the real provider API
//!
//! # Architecture
//!
//! - `shortscript_error` - Error types
//! - `shortscript_core` - Requests, messages and script results
//! - `shortscript_interface` - Generator and collaborator traits
//! - `shortscript_rate_limit` - Retry policy and configuration
//! - `shortscript_prompt` - Prompt catalog, truncation and rendering
//! - `shortscript_models` - Providers and the completion client
//! - `shortscript_storage` - File-backed queue, sink, exporter and notifier
//! - `shortscript_pipeline` - Batch execution and platform formatting
//!
//! This crate (`shortscript`) re-exports everything for convenience.

mod setup;

pub use setup::client_from_config;

pub use shortscript_core::*;
pub use shortscript_error::*;
pub use shortscript_interface::*;
pub use shortscript_models::*;
pub use shortscript_pipeline::{BatchExecutor, BatchReport, ItemOutcome, format_for_platform};
pub use shortscript_prompt::*;
pub use shortscript_rate_limit::*;
pub use shortscript_storage::*;

// OpenTelemetry observability module
#[cfg(feature = "observability")]
pub mod observability;
