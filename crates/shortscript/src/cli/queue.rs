//! Work-queue command handlers.

use super::RequestArgs;
use super::request::{build_request, load_config};
use chrono::Local;
use shortscript::{
    BatchExecutor, DocumentExporter, EnvCredentials, JsonFileQueue, JsonLinesSink, LogNotifier,
    MarkdownExporter, Notifier, ScriptRecord, ScriptSink, ShortscriptConfig, ShortscriptResult,
    WorkQueue, WorkStatus, client_from_config, document_title,
};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Add a request to the work queue.
pub async fn submit_request(config_path: Option<&Path>, args: &RequestArgs) -> ShortscriptResult<()> {
    let config = load_config(config_path)?;
    let request = build_request(args).await?;
    let queue = JsonFileQueue::new(&config.storage.queue_path);

    let item = queue.submit(request).await?;
    println!("Queued {} in {}", item.id, queue.path().display());
    Ok(())
}

/// Process every pending request, then export the new scripts and notify.
pub async fn run_batch(
    config_path: Option<&Path>,
    notify: Option<&str>,
    no_export: bool,
) -> ShortscriptResult<()> {
    let config = load_config(config_path)?;
    let client = client_from_config(&config, &EnvCredentials)?;
    let executor = BatchExecutor::new(
        client,
        Box::new(JsonFileQueue::new(&config.storage.queue_path)),
        Box::new(JsonLinesSink::new(&config.storage.results_path)),
    )
    .with_delay(config.batch.delay());

    let report = executor.run().await?;
    for outcome in &report.outcomes {
        println!("{}  {}", outcome.id, outcome.status);
    }
    println!(
        "Processed {} request(s): {} succeeded, {} failed, {} scripts in {:.1}s",
        report.processed,
        report.succeeded,
        report.failed,
        report.scripts,
        report.elapsed.as_secs_f64()
    );

    if no_export || report.succeeded == 0 {
        return Ok(());
    }

    let completed: HashSet<&str> = report
        .outcomes
        .iter()
        .filter(|outcome| matches!(outcome.status, WorkStatus::Completed { .. }))
        .map(|outcome| outcome.id.as_str())
        .collect();
    let records: Vec<ScriptRecord> = executor
        .sink()
        .records()
        .await?
        .into_iter()
        .filter(|record| completed.contains(record.request_id.as_str()))
        .collect();

    let artifact = export(&config, &records).await?;
    if let Some(recipient) = notify {
        LogNotifier.notify(recipient, &artifact).await?;
    }
    Ok(())
}

/// Export stored scripts, optionally of a single request.
pub async fn export_results(
    config_path: Option<&Path>,
    request_id: Option<&str>,
) -> ShortscriptResult<()> {
    let config = load_config(config_path)?;
    let records: Vec<ScriptRecord> = JsonLinesSink::new(&config.storage.results_path)
        .records()
        .await?
        .into_iter()
        .filter(|record| request_id.is_none_or(|id| record.request_id == id))
        .collect();

    if records.is_empty() {
        println!("No scripts to export");
        return Ok(());
    }
    export(&config, &records).await?;
    Ok(())
}

async fn export(
    config: &ShortscriptConfig,
    records: &[ScriptRecord],
) -> ShortscriptResult<shortscript::ArtifactRef> {
    let title = document_title(Local::now().date_naive());
    let artifact = MarkdownExporter::new(&config.storage.export_dir)
        .export(&title, records)
        .await?;
    info!(records = records.len(), artifact = %artifact, "Exported scripts");
    println!("Document: {}", artifact);
    Ok(artifact)
}
