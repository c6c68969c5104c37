//! Turning command-line options into configuration and requests.

use super::RequestArgs;
use shortscript::{
    BuilderError, ConfigError, GenerationRequest, ReferenceMaterial, ShortscriptConfig,
    ShortscriptError, ShortscriptResult, StorageError, StorageErrorKind,
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load the explicit configuration file, or the layered defaults.
pub fn load_config(path: Option<&Path>) -> ShortscriptResult<ShortscriptConfig> {
    match path {
        Some(path) => ShortscriptConfig::from_file(path),
        None => ShortscriptConfig::load(),
    }
}

/// Read a UTF-8 text file.
pub async fn read_text(path: &Path) -> ShortscriptResult<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        ShortscriptError::from(StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        ))))
    })
}

/// A `--reference title:purpose:file` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReferenceArg {
    title: String,
    purpose: String,
    path: PathBuf,
}

fn parse_reference(arg: &str) -> ShortscriptResult<ReferenceArg> {
    let mut parts = arg.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(title), Some(purpose), Some(path))
            if !title.trim().is_empty() && !path.trim().is_empty() =>
        {
            Ok(ReferenceArg {
                title: title.trim().to_string(),
                purpose: purpose.trim().to_string(),
                path: PathBuf::from(path.trim()),
            })
        }
        _ => Err(ConfigError::new(format!(
            "Invalid reference '{}', expected title:purpose:file",
            arg
        ))
        .into()),
    }
}

/// Build a generation request, reading the source and reference files.
pub async fn build_request(args: &RequestArgs) -> ShortscriptResult<GenerationRequest> {
    let source = read_text(&args.input).await?;

    let mut materials = Vec::with_capacity(args.references.len());
    for arg in &args.references {
        let reference = parse_reference(arg)?;
        let content = read_text(&reference.path).await?;
        materials.push(ReferenceMaterial::new(
            reference.title,
            content,
            reference.purpose,
        ));
    }
    debug!(
        source_chars = source.chars().count(),
        references = materials.len(),
        "Read request inputs"
    );

    let mut builder = GenerationRequest::builder();
    builder
        .source_content(source)
        .script_count(args.count)
        .word_count_range(args.words.clone())
        .reference_materials(materials);
    if let Some(style) = &args.style {
        builder.style(style.clone());
    }
    if let Some(platform) = &args.platform {
        builder.platform(platform.clone());
    }
    if let Some(system_prompt) = &args.system_prompt {
        builder.system_prompt(system_prompt.clone());
    }

    builder
        .build()
        .map_err(|e| ShortscriptError::from(BuilderError::from(e)))
}
