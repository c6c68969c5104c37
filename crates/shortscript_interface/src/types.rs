//! Types exchanged with collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shortscript_core::{GenerationRequest, ScriptResult};

/// Location of a generated artifact (a URL or a file path).
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct ArtifactRef(String);

impl From<String> for ArtifactRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ArtifactRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl ArtifactRef {
    /// The raw reference string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Text sent to a user when their document is ready.
///
/// # Examples
///
/// ```
/// use shortscript_interface::{ArtifactRef, notification_message};
///
/// let message = notification_message(&ArtifactRef::from("exports/scripts.md"));
/// assert_eq!(message, "您的短视频脚本已生成！\n点击查看文档：exports/scripts.md");
/// ```
pub fn notification_message(artifact: &ArtifactRef) -> String {
    format!("您的短视频脚本已生成！\n点击查看文档：{}", artifact)
}

/// Processing state of a queued request.
///
/// Display strings match what a spreadsheet status column shows.
///
/// # Examples
///
/// ```
/// use shortscript_interface::WorkStatus;
///
/// assert_eq!(WorkStatus::Processing.to_string(), "Processing...");
/// assert_eq!(WorkStatus::Completed { scripts: 3 }.to_string(), "Completed (3 scripts)");
/// assert_eq!(
///     WorkStatus::Failed { message: "timeout".to_string() }.to_string(),
///     "Error: timeout"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WorkStatus {
    /// Waiting to be processed
    #[default]
    #[display("Pending")]
    Pending,
    /// Generation in flight
    #[display("Processing...")]
    Processing,
    /// Generation succeeded
    #[display("Completed ({} scripts)", scripts)]
    Completed {
        /// Number of scripts stored
        scripts: usize,
    },
    /// Generation failed; the batch moved on
    #[display("Error: {}", message)]
    Failed {
        /// Error text recorded against the request
        message: String,
    },
}

impl WorkStatus {
    /// Whether the item still needs processing.
    pub fn is_pending(&self) -> bool {
        matches!(self, WorkStatus::Pending)
    }
}

/// A request waiting in (or finished by) a work queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    /// Stable identifier
    pub id: String,
    /// What to generate
    pub request: GenerationRequest,
    /// Current state
    #[serde(default)]
    pub status: WorkStatus,
    /// When the item entered the queue
    pub submitted_at: DateTime<Utc>,
    /// When processing finished, successfully or not
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl WorkItem {
    /// Wrap a request as a new pending item with a fresh identifier.
    pub fn new(request: GenerationRequest) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            request,
            status: WorkStatus::Pending,
            submitted_at: Utc::now(),
            finished_at: None,
        }
    }
}

/// One stored script row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRecord {
    /// Work item the script belongs to
    pub request_id: String,
    /// 1-based position within the request
    pub script_number: usize,
    /// Theme title
    pub theme: String,
    /// Opening hook, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    /// Script text
    pub content: String,
    /// Length of the script in characters
    pub word_count: usize,
    /// When the row was written
    pub generated_at: DateTime<Utc>,
}

impl ScriptRecord {
    /// Build the row for the `index`-th (0-based) script of a request.
    pub fn from_script(request_id: &str, index: usize, script: &ScriptResult) -> Self {
        Self {
            request_id: request_id.to_string(),
            script_number: index + 1,
            theme: script.theme.clone(),
            hook: script.hook.clone(),
            content: script.content.clone(),
            word_count: script.word_count(),
            generated_at: Utc::now(),
        }
    }

    /// Group rows by request, keeping first-seen request order.
    pub fn group_by_request(records: &[ScriptRecord]) -> Vec<(&str, Vec<&ScriptRecord>)> {
        let mut groups: Vec<(&str, Vec<&ScriptRecord>)> = Vec::new();
        for record in records {
            match groups
                .iter()
                .position(|(id, _)| *id == record.request_id.as_str())
            {
                Some(index) => groups[index].1.push(record),
                None => groups.push((record.request_id.as_str(), vec![record])),
            }
        }
        groups
    }
}
