//! Tests for the file-backed collaborators.

use shortscript_core::{GenerationRequest, ScriptResult};
use shortscript_interface::{
    ArtifactRef, DocumentExporter, Notifier, ScriptRecord, ScriptSink, WorkQueue, WorkStatus,
};
use shortscript_storage::{JsonFileQueue, JsonLinesSink, LogNotifier, MarkdownExporter};
use tempfile::TempDir;

fn request(source: &str) -> GenerationRequest {
    GenerationRequest::builder()
        .source_content(source)
        .script_count(2)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_queue_submit_and_pending() {
    let temp_dir = TempDir::new().unwrap();
    let queue = JsonFileQueue::new(temp_dir.path().join("queue.json"));

    assert!(queue.pending().await.unwrap().is_empty());

    let first = queue.submit(request("第一篇")).await.unwrap();
    let second = queue.submit(request("第二篇")).await.unwrap();

    let pending = queue.pending().await.unwrap();
    assert_eq!(pending.len(), 2);
    assert_eq!(pending[0].id, first.id);
    assert_eq!(pending[1].id, second.id);
    assert_eq!(pending[1].request.source_content(), "第二篇");
}

#[tokio::test]
async fn test_queue_status_updates_persist() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested/queue.json");
    let queue = JsonFileQueue::new(&path);

    let done = queue.submit(request("完成")).await.unwrap();
    let failed = queue.submit(request("失败")).await.unwrap();
    let waiting = queue.submit(request("等待")).await.unwrap();

    queue
        .update_status(&done.id, WorkStatus::Completed { scripts: 2 })
        .await
        .unwrap();
    queue
        .update_status(
            &failed.id,
            WorkStatus::Failed {
                message: "timeout".to_string(),
            },
        )
        .await
        .unwrap();

    // A fresh instance reads the same file.
    let reopened = JsonFileQueue::new(&path);
    let pending = reopened.pending().await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, waiting.id);

    let items = reopened.items().await.unwrap();
    let done_item = items.iter().find(|i| i.id == done.id).unwrap();
    assert_eq!(done_item.status.to_string(), "Completed (2 scripts)");
    assert!(done_item.finished_at.is_some());
    assert!(!path.with_extension("tmp").exists());
}

#[tokio::test]
async fn test_queue_unknown_id_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let queue = JsonFileQueue::new(temp_dir.path().join("queue.json"));

    let result = queue.update_status("missing", WorkStatus::Processing).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_queue_rejects_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("queue.json");
    std::fs::write(&path, "not json").unwrap();

    let queue = JsonFileQueue::new(&path);
    assert!(queue.pending().await.is_err());
}

#[tokio::test]
async fn test_sink_appends_rows() {
    let temp_dir = TempDir::new().unwrap();
    let sink = JsonLinesSink::new(temp_dir.path().join("results.jsonl"));

    let written = sink
        .append(
            "req-1",
            &[
                ScriptResult::new("A", "第一条脚本"),
                ScriptResult::new("B", "第二条").with_hook("钩子"),
            ],
        )
        .await
        .unwrap();
    assert_eq!(written, 2);
    sink.append("req-2", &[ScriptResult::new("C", "c")])
        .await
        .unwrap();

    let records = sink.records().await.unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].script_number, 1);
    assert_eq!(records[0].word_count, 5);
    assert_eq!(records[1].hook.as_deref(), Some("钩子"));
    assert_eq!(records[2].request_id, "req-2");
    assert_eq!(records[2].script_number, 1);
}

#[tokio::test]
async fn test_sink_without_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let sink = JsonLinesSink::new(temp_dir.path().join("none.jsonl"));
    assert!(sink.records().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_export_writes_markdown_file() {
    let temp_dir = TempDir::new().unwrap();
    let sink = JsonLinesSink::new(temp_dir.path().join("results.jsonl"));
    sink.append("req-1", &[ScriptResult::new("主题一", "内容一")])
        .await
        .unwrap();

    let exporter = MarkdownExporter::new(temp_dir.path().join("exports"));
    let records = sink.records().await.unwrap();
    let artifact = exporter
        .export("短视频脚本 - 2024/3/5", &records)
        .await
        .unwrap();

    let markdown = std::fs::read_to_string(artifact.as_str()).unwrap();
    assert!(markdown.starts_with("# 短视频脚本 - 2024/3/5"));
    assert!(markdown.contains("## Request #req-1"));
    assert!(markdown.contains("### 主题一\n\n内容一\n\n---"));
}

#[tokio::test]
async fn test_back_to_back_exports_keep_both_files() {
    let temp_dir = TempDir::new().unwrap();
    let exports = temp_dir.path().join("exports");
    let exporter = MarkdownExporter::new(&exports);
    let records = vec![ScriptRecord::from_script(
        "req-1",
        0,
        &ScriptResult::new("主题一", "内容一"),
    )];

    let first = exporter.export("第一份", &records).await.unwrap();
    let second = exporter.export("第二份", &records).await.unwrap();

    assert_ne!(first, second);
    assert!(std::fs::read_to_string(first.as_str()).unwrap().starts_with("# 第一份"));
    assert!(std::fs::read_to_string(second.as_str()).unwrap().starts_with("# 第二份"));
    assert_eq!(std::fs::read_dir(&exports).unwrap().count(), 2);
}

#[tokio::test]
async fn test_log_notifier_succeeds() {
    LogNotifier
        .notify("ops@example.com", &ArtifactRef::from("exports/a.md"))
        .await
        .unwrap();
}
