//! Batch executor tests against scripted generators.

use async_trait::async_trait;
use shortscript_core::{GenerationRequest, GenerationResponse, ScriptResult};
use shortscript_error::{GenerationError, GenerationErrorKind, ShortscriptResult};
use shortscript_interface::{ScriptGenerator, ScriptRecord, ScriptSink, WorkQueue, WorkStatus};
use shortscript_pipeline::BatchExecutor;
use shortscript_storage::{JsonFileQueue, JsonLinesSink};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::time::Instant;

/// Returns two scripts per request, or a transport failure when the source mentions "失败".
#[derive(Clone, Default)]
struct ScriptedGenerator {
    calls: Arc<Mutex<Vec<(String, Instant)>>>,
}

impl ScriptedGenerator {
    fn calls(&self) -> Vec<(String, Instant)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScriptGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> ShortscriptResult<GenerationResponse> {
        let source = request.source_content().to_string();
        self.calls
            .lock()
            .unwrap()
            .push((source.clone(), Instant::now()));

        if source.contains("失败") {
            return Err(GenerationError::new(GenerationErrorKind::RetriesExhausted {
                attempts: 3,
                last: Box::new(GenerationErrorKind::Transport {
                    status: Some(503),
                    message: "overloaded".to_string(),
                }),
            })
            .into());
        }

        Ok(GenerationResponse {
            scripts: vec![
                ScriptResult::new(format!("{}-A", source), "正文一"),
                ScriptResult::new(format!("{}-B", source), "正文二").with_hook("钩子"),
            ],
            attempts: 1,
            used_fallback: false,
            model: "scripted".to_string(),
            usage: None,
        })
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

#[derive(Clone, Default)]
struct MemoryQueue {
    items: Arc<Mutex<Vec<shortscript_interface::WorkItem>>>,
}

#[async_trait]
impl WorkQueue for MemoryQueue {
    async fn submit(
        &self,
        request: GenerationRequest,
    ) -> ShortscriptResult<shortscript_interface::WorkItem> {
        let item = shortscript_interface::WorkItem::new(request);
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn pending(&self) -> ShortscriptResult<Vec<shortscript_interface::WorkItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.status.is_pending())
            .cloned()
            .collect())
    }

    async fn update_status(&self, id: &str, status: WorkStatus) -> ShortscriptResult<()> {
        let mut items = self.items.lock().unwrap();
        if let Some(item) = items.iter_mut().find(|item| item.id == id) {
            item.status = status;
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MemorySink {
    records: Arc<Mutex<Vec<ScriptRecord>>>,
}

#[async_trait]
impl ScriptSink for MemorySink {
    async fn append(&self, request_id: &str, scripts: &[ScriptResult]) -> ShortscriptResult<usize> {
        let mut records = self.records.lock().unwrap();
        records.extend(
            scripts
                .iter()
                .enumerate()
                .map(|(index, script)| ScriptRecord::from_script(request_id, index, script)),
        );
        Ok(scripts.len())
    }

    async fn records(&self) -> ShortscriptResult<Vec<ScriptRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }
}

fn request(source: &str) -> GenerationRequest {
    GenerationRequest::builder()
        .source_content(source)
        .script_count(2)
        .build()
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_failure_does_not_stop_batch() {
    let generator = ScriptedGenerator::default();
    let queue = MemoryQueue::default();
    let sink = MemorySink::default();

    queue.submit(request("一")).await.unwrap();
    let failing = queue.submit(request("会失败")).await.unwrap();
    queue.submit(request("三")).await.unwrap();

    let executor = BatchExecutor::new(
        generator.clone(),
        Box::new(queue.clone()),
        Box::new(sink.clone()),
    );
    let report = executor.run().await.unwrap();

    assert_eq!(report.processed, 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.scripts, 4);
    assert!(!report.all_succeeded());

    let failed = &report.outcomes[1];
    assert_eq!(failed.id, failing.id);
    match &failed.status {
        WorkStatus::Failed { message } => {
            assert!(message.starts_with("Failed after 3 attempts"));
            assert!(message.contains("overloaded"));
        }
        other => panic!("expected failure, got {:?}", other),
    }

    assert_eq!(generator.calls().len(), 3);
    assert!(queue.pending().await.unwrap().is_empty());
    assert_eq!(sink.records().await.unwrap().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_requests_are_spaced_by_delay() {
    let generator = ScriptedGenerator::default();
    let queue = MemoryQueue::default();
    for source in ["甲", "乙", "丙"] {
        queue.submit(request(source)).await.unwrap();
    }

    let executor = BatchExecutor::new(
        generator.clone(),
        Box::new(queue),
        Box::new(MemorySink::default()),
    );
    let report = executor.run().await.unwrap();

    let calls = generator.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].1 - calls[0].1, Duration::from_millis(2000));
    assert_eq!(calls[2].1 - calls[1].1, Duration::from_millis(2000));
    // No pause before the first request or after the last one.
    assert_eq!(report.elapsed, Duration::from_millis(4000));
}

#[tokio::test(start_paused = true)]
async fn test_custom_delay() {
    let generator = ScriptedGenerator::default();
    let queue = MemoryQueue::default();
    queue.submit(request("甲")).await.unwrap();
    queue.submit(request("乙")).await.unwrap();

    BatchExecutor::new(
        generator.clone(),
        Box::new(queue),
        Box::new(MemorySink::default()),
    )
    .with_delay(Duration::from_millis(250))
    .run()
    .await
    .unwrap();

    let calls = generator.calls();
    assert_eq!(calls[1].1 - calls[0].1, Duration::from_millis(250));
}

#[tokio::test]
async fn test_empty_queue_is_a_noop() {
    let generator = ScriptedGenerator::default();
    let executor = BatchExecutor::new(
        generator.clone(),
        Box::new(MemoryQueue::default()),
        Box::new(MemorySink::default()),
    );

    let report = executor.run().await.unwrap();
    assert_eq!(report.processed, 0);
    assert!(report.all_succeeded());
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_batch_over_file_collaborators() {
    let temp_dir = TempDir::new().unwrap();
    let queue_path = temp_dir.path().join("queue.json");
    let results_path = temp_dir.path().join("results.jsonl");

    let queue = JsonFileQueue::new(&queue_path);
    let ok = queue.submit(request("成功")).await.unwrap();
    let bad = queue.submit(request("失败")).await.unwrap();

    let report = BatchExecutor::new(
        ScriptedGenerator::default(),
        Box::new(queue),
        Box::new(JsonLinesSink::new(&results_path)),
    )
    .with_delay(Duration::ZERO)
    .run()
    .await
    .unwrap();
    assert_eq!(report.succeeded, 1);

    let items = JsonFileQueue::new(&queue_path).items().await.unwrap();
    let ok_item = items.iter().find(|item| item.id == ok.id).unwrap();
    let bad_item = items.iter().find(|item| item.id == bad.id).unwrap();
    assert_eq!(ok_item.status, WorkStatus::Completed { scripts: 2 });
    assert!(ok_item.finished_at.is_some());
    assert!(matches!(bad_item.status, WorkStatus::Failed { .. }));

    let records = JsonLinesSink::new(&results_path).records().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].request_id, ok.id);
    assert_eq!(records[0].theme, "成功-A");
    assert_eq!(records[1].script_number, 2);
    assert_eq!(records[1].hook.as_deref(), Some("钩子"));
}
