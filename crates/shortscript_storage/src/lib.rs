//! File-backed collaborators for shortscript.
//!
//! - [`EnvCredentials`] and [`StaticCredentials`] supply API keys
//! - [`JsonFileQueue`] keeps pending requests in one JSON file
//! - [`JsonLinesSink`] appends one JSON row per generated script
//! - [`MarkdownExporter`] renders stored scripts into a Markdown document
//! - [`LogNotifier`] announces finished documents through `tracing`
//!
//! Writes that replace a whole file go through a temp file and a rename so a
//! crash never leaves a half-written queue or document behind.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credentials;
mod exporter;
mod fs;
mod notifier;
mod queue;
mod sink;

pub use credentials::{EnvCredentials, StaticCredentials};
pub use exporter::{MarkdownExporter, document_title};
pub use notifier::LogNotifier;
pub use queue::JsonFileQueue;
pub use sink::JsonLinesSink;
