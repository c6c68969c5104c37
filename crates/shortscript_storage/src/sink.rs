//! JSON Lines result sink.

use crate::fs::{ensure_parent, read_optional};
use async_trait::async_trait;
use shortscript_core::ScriptResult;
use shortscript_error::{
    JsonError, ShortscriptError, ShortscriptResult, StorageError, StorageErrorKind,
};
use shortscript_interface::{ScriptRecord, ScriptSink};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{info, instrument};

/// Appends one JSON object per script to a `.jsonl` file.
pub struct JsonLinesSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLinesSink {
    /// Sink writing to the file at `path`.
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
}

#[async_trait]
impl ScriptSink for JsonLinesSink {
    #[instrument(skip(self, scripts), fields(path = %self.path.display(), scripts = scripts.len()))]
    async fn append(&self, request_id: &str, scripts: &[ScriptResult]) -> ShortscriptResult<usize> {
        let mut buffer = String::new();
        for (index, script) in scripts.iter().enumerate() {
            let record = ScriptRecord::from_script(request_id, index, script);
            let line = serde_json::to_string(&record)
                .map_err(|e| JsonError::new(format!("Failed to serialize script row: {}", e)))?;
            buffer.push_str(&line);
            buffer.push('\n');
        }

        let _guard = self.lock.lock().await;
        ensure_parent(&self.path).await?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            })?;
        file.write_all(buffer.as_bytes()).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;
        file.flush().await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        info!(request_id, rows = scripts.len(), "Stored scripts");
        Ok(scripts.len())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn records(&self) -> ShortscriptResult<Vec<ScriptRecord>> {
        let _guard = self.lock.lock().await;
        let Some(text) = read_optional(&self.path).await? else {
            return Ok(Vec::new());
        };

        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(number, line)| {
                serde_json::from_str::<ScriptRecord>(line).map_err(|e| {
                    ShortscriptError::from(JsonError::new(format!(
                        "{} line {}: {}",
                        self.path.display(),
                        number + 1,
                        e
                    )))
                })
            })
            .collect()
    }
}
