//! JSON-file work queue.

use crate::fs::{read_optional, write_atomic};
use async_trait::async_trait;
use chrono::Utc;
use shortscript_core::GenerationRequest;
use shortscript_error::{JsonError, ShortscriptResult, StorageError, StorageErrorKind};
use shortscript_interface::{WorkItem, WorkQueue, WorkStatus};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Work queue persisted as a JSON array in a single file.
///
/// Every operation reads the file, applies the change and writes it back
/// atomically. A missing file is an empty queue. Operations on one instance
/// are serialized; separate processes sharing a file are not coordinated.
pub struct JsonFileQueue {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileQueue {
    /// Queue backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every item, finished or not, in submission order.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid queue.
    pub async fn items(&self) -> ShortscriptResult<Vec<WorkItem>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn load(&self) -> ShortscriptResult<Vec<WorkItem>> {
        let Some(text) = read_optional(&self.path).await? else {
            return Ok(Vec::new());
        };
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            JsonError::new(format!(
                "Failed to parse queue {}: {}",
                self.path.display(),
                e
            ))
            .into()
        })
    }

    async fn save(&self, items: &[WorkItem]) -> ShortscriptResult<()> {
        let json = serde_json::to_vec_pretty(items)
            .map_err(|e| JsonError::new(format!("Failed to serialize queue: {}", e)))?;
        write_atomic(&self.path, &json).await
    }
}

#[async_trait]
impl WorkQueue for JsonFileQueue {
    #[instrument(skip(self, request), fields(path = %self.path.display()))]
    async fn submit(&self, request: GenerationRequest) -> ShortscriptResult<WorkItem> {
        request.validate()?;

        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        let item = WorkItem::new(request);
        items.push(item.clone());
        self.save(&items).await?;

        info!(id = %item.id, queued = items.len(), "Submitted work item");
        Ok(item)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn pending(&self) -> ShortscriptResult<Vec<WorkItem>> {
        let _guard = self.lock.lock().await;
        let pending: Vec<WorkItem> = self
            .load()
            .await?
            .into_iter()
            .filter(|item| item.status.is_pending())
            .collect();
        debug!(pending = pending.len(), "Loaded pending items");
        Ok(pending)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn update_status(&self, id: &str, status: WorkStatus) -> ShortscriptResult<()> {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;

        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| StorageError::new(StorageErrorKind::NotFound(id.to_string())))?;

        item.finished_at = match status {
            WorkStatus::Completed { .. } | WorkStatus::Failed { .. } => Some(Utc::now()),
            WorkStatus::Pending | WorkStatus::Processing => None,
        };
        debug!(id, status = %status, "Updating work item");
        item.status = status;

        self.save(&items).await
    }
}
