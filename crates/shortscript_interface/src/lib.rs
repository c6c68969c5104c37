//! Trait definitions for shortscript.
//!
//! The generation core talks to the outside world through these traits:
//! a [`ScriptGenerator`] produces scripts, a [`CredentialSource`] supplies the
//! provider key, and the [`WorkQueue`], [`ScriptSink`], [`DocumentExporter`]
//! and [`Notifier`] collaborators own persistence and delivery.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{
    CredentialSource, DocumentExporter, Notifier, ScriptGenerator, ScriptSink, WorkQueue,
};
pub use types::{ArtifactRef, ScriptRecord, WorkItem, WorkStatus, notification_message};
