//! Sequential batch processing of queued requests.

use serde::{Deserialize, Serialize};
use shortscript_error::{ShortscriptError, ShortscriptResult};
use shortscript_interface::{ScriptGenerator, ScriptSink, WorkItem, WorkQueue, WorkStatus};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Outcome of one queued request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    /// Work item identifier
    pub id: String,
    /// Status recorded against the item
    pub status: WorkStatus,
}

/// Summary of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Items taken from the queue
    pub processed: usize,
    /// Items that produced scripts
    pub succeeded: usize,
    /// Items recorded as failed
    pub failed: usize,
    /// Scripts written to the sink
    pub scripts: usize,
    /// Wall time of the run
    pub elapsed: Duration,
    /// Per-item outcomes in processing order
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    /// Whether every processed item succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, id: &str, status: WorkStatus) {
        self.processed += 1;
        match &status {
            WorkStatus::Completed { scripts } => {
                self.succeeded += 1;
                self.scripts += scripts;
            }
            WorkStatus::Failed { .. } => self.failed += 1,
            WorkStatus::Pending | WorkStatus::Processing => {}
        }
        self.outcomes.push(ItemOutcome {
            id: id.to_string(),
            status,
        });
    }
}

/// Processes every pending request in a queue, one at a time.
///
/// Consecutive requests are separated by a fixed pause. A failing request is
/// marked `Failed` with the error text and the batch continues; only queue
/// errors abort the run.
pub struct BatchExecutor<G: ScriptGenerator> {
    generator: G,
    queue: Box<dyn WorkQueue>,
    sink: Box<dyn ScriptSink>,
    delay: Duration,
}

impl<G: ScriptGenerator> BatchExecutor<G> {
    /// Pause between consecutive requests unless overridden.
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

    /// Create an executor over a generator, a queue and a sink.
    pub fn new(generator: G, queue: Box<dyn WorkQueue>, sink: Box<dyn ScriptSink>) -> Self {
        Self {
            generator,
            queue,
            sink,
            delay: Self::DEFAULT_DELAY,
        }
    }

    /// Set the pause between consecutive requests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The generator used for each request.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// The sink receiving generated scripts.
    pub fn sink(&self) -> &dyn ScriptSink {
        self.sink.as_ref()
    }

    /// Process every pending item.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue cannot be read or an item's status
    /// cannot be recorded. Generation and sink failures are recorded against
    /// the item instead.
    #[instrument(
        skip(self),
        fields(
            provider = %self.generator.provider_name(),
            model = %self.generator.model_name(),
            delay_ms = self.delay.as_millis() as u64
        )
    )]
    pub async fn run(&self) -> ShortscriptResult<BatchReport> {
        let started = Instant::now();
        let pending = self.queue.pending().await?;
        info!(count = pending.len(), "Starting batch");

        let mut report = BatchReport::default();
        for (index, item) in pending.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                debug!(delay_ms = self.delay.as_millis() as u64, "Pausing before next request");
                tokio::time::sleep(self.delay).await;
            }

            let status = self.process(item).await?;
            report.record(&item.id, status);
        }

        report.elapsed = started.elapsed();
        info!(
            processed = report.processed,
            succeeded = report.succeeded,
            failed = report.failed,
            scripts = report.scripts,
            "Batch finished"
        );
        Ok(report)
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn process(&self, item: &WorkItem) -> ShortscriptResult<WorkStatus> {
        self.queue
            .update_status(&item.id, WorkStatus::Processing)
            .await?;

        let status = match self.generate_and_store(item).await {
            Ok(scripts) => {
                info!(scripts, "Request completed");
                WorkStatus::Completed { scripts }
            }
            Err(e) => {
                let message = failure_message(&e);
                error!(error = %message, "Request failed");
                WorkStatus::Failed { message }
            }
        };

        self.queue.update_status(&item.id, status.clone()).await?;
        Ok(status)
    }

    async fn generate_and_store(&self, item: &WorkItem) -> ShortscriptResult<usize> {
        let response = self.generator.generate(&item.request).await?;
        if response.used_fallback {
            warn!("Stored a fallback script, the model did not return a JSON array");
        }
        self.sink.append(&item.id, &response.scripts).await
    }
}

fn failure_message(error: &ShortscriptError) -> String {
    match error.generation_kind() {
        Some(kind) => kind.to_string(),
        None => error.kind().to_string(),
    }
}
