//! Batch execution and platform formatting for shortscript.
//!
//! [`BatchExecutor`] drains a work queue one request at a time, pausing
//! between requests so independent calls stay under provider throttling.
//! A failed request is recorded and the batch moves on.
//!
//! [`format_for_platform`] applies light per-platform post-processing to a
//! finished script.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod format;

pub use batch::{BatchExecutor, BatchReport, ItemOutcome};
pub use format::format_for_platform;
pub use shortscript_interface::notification_message;
