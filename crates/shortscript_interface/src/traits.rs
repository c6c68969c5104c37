//! Trait definitions for the generator and its collaborators.

use crate::{ArtifactRef, ScriptRecord, WorkItem, WorkStatus};
use async_trait::async_trait;
use shortscript_core::{GenerationRequest, GenerationResponse, ScriptResult};
use shortscript_error::ShortscriptResult;

/// Core trait for anything that turns a request into scripts.
///
/// The completion client implements it against a live provider; tests and
/// batch callers can substitute their own.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// Build the prompt, call the model and extract scripts.
    async fn generate(&self, request: &GenerationRequest) -> ShortscriptResult<GenerationResponse>;

    /// Provider name (e.g., "deepseek", "openai").
    fn provider_name(&self) -> &str;

    /// Model identifier (e.g., "deepseek-chat").
    fn model_name(&self) -> &str;
}

/// Key/value store that supplies provider API keys by name.
pub trait CredentialSource: Send + Sync {
    /// Look up a credential. Blank values count as absent.
    fn get(&self, key: &str) -> Option<String>;
}

/// Queue of requests waiting to be processed.
#[async_trait]
pub trait WorkQueue: Send + Sync {
    /// Add a request as a pending item.
    async fn submit(&self, request: GenerationRequest) -> ShortscriptResult<WorkItem>;

    /// Items whose status is still pending, in submission order.
    async fn pending(&self) -> ShortscriptResult<Vec<WorkItem>>;

    /// Record a new status against an item.
    async fn update_status(&self, id: &str, status: WorkStatus) -> ShortscriptResult<()>;
}

/// Destination for generated scripts, one row per script.
#[async_trait]
pub trait ScriptSink: Send + Sync {
    /// Append scripts for a request. Returns the number of rows written.
    async fn append(&self, request_id: &str, scripts: &[ScriptResult]) -> ShortscriptResult<usize>;

    /// Every stored row, in insertion order.
    async fn records(&self) -> ShortscriptResult<Vec<ScriptRecord>>;
}

/// Renders stored scripts into a shareable document.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Export records under the given title and return where the document lives.
    async fn export(&self, title: &str, records: &[ScriptRecord]) -> ShortscriptResult<ArtifactRef>;
}

/// Tells a user that an artifact is ready.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a short confirmation pointing at the artifact.
    async fn notify(&self, recipient: &str, artifact: &ArtifactRef) -> ShortscriptResult<()>;
}
