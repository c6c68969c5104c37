//! Markdown document export.

use crate::fs::write_atomic;
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate};
use shortscript_error::ShortscriptResult;
use shortscript_interface::{ArtifactRef, DocumentExporter, ScriptRecord};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use uuid::Uuid;

/// Conventional document title for the given day, e.g. `短视频脚本 - 2024/3/5`.
pub fn document_title(date: NaiveDate) -> String {
    format!("短视频脚本 - {}", date.format("%Y/%-m/%-d"))
}

/// Writes exported scripts as Markdown files in a directory.
///
/// Records are grouped by request under `## Request #{id}`; each script is a
/// `### {theme}` block followed by its content and a `---` rule. The returned
/// artifact reference is the path of the written file.
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    dir: PathBuf,
}

impl MarkdownExporter {
    /// Exporter writing into `dir` (created on first export).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render the document body without writing it.
    ///
    /// # Examples
    ///
    /// ```
    /// use shortscript_core::ScriptResult;
    /// use shortscript_interface::ScriptRecord;
    /// use shortscript_storage::MarkdownExporter;
    ///
    /// let record = ScriptRecord::from_script("r1", 0, &ScriptResult::new("早起", "正文"));
    /// let markdown = MarkdownExporter::render("短视频脚本 - 2024/3/5", &[record]);
    /// assert!(markdown.starts_with("# 短视频脚本 - 2024/3/5\n"));
    /// assert!(markdown.contains("## Request #r1\n"));
    /// assert!(markdown.contains("### 早起\n\n正文\n\n---"));
    /// ```
    pub fn render(title: &str, records: &[ScriptRecord]) -> String {
        let mut out = format!("# {}\n", title);
        for (request_id, scripts) in ScriptRecord::group_by_request(records) {
            out.push_str(&format!("\n## Request #{}\n", request_id));
            for record in scripts {
                out.push_str(&format!("\n### {}\n\n", record.theme));
                if let Some(hook) = &record.hook {
                    out.push_str(&format!("> {}\n\n", hook));
                }
                out.push_str(&format!("{}\n\n---\n", record.content));
            }
        }
        out
    }

    /// `shortscript-{timestamp}-{suffix}.md`; the random suffix keeps exports
    /// made within the same second apart.
    fn file_name(now: DateTime<Local>) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "shortscript-{}-{}.md",
            now.format("%Y%m%d-%H%M%S"),
            &suffix[..8]
        )
    }
}

#[async_trait]
impl DocumentExporter for MarkdownExporter {
    #[instrument(skip(self, records), fields(dir = %self.dir.display(), records = records.len()))]
    async fn export(&self, title: &str, records: &[ScriptRecord]) -> ShortscriptResult<ArtifactRef> {
        let path = self.dir.join(Self::file_name(Local::now()));
        let markdown = Self::render(title, records);
        write_atomic(&path, markdown.as_bytes()).await?;

        info!(path = %path.display(), "Exported document");
        Ok(ArtifactRef::from(path.display().to_string()))
    }
}
