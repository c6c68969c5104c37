//! Retry policy, batch pacing and configuration.
//!
//! Provider calls are retried with a linear backoff: after the k-th failed
//! attempt the client waits `base_delay * k` before trying again. Batch
//! callers additionally pause between independent calls to stay under
//! provider throttling.
//!
//! Configuration is TOML, layered as bundled defaults, then
//! `~/.config/shortscript/shortscript.toml`, then `./shortscript.toml`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod retry;

pub use config::{
    BatchSettings, ProviderSettings, RetrySettings, ShortscriptConfig, StorageSettings,
};
pub use retry::{LinearBackoff, RetryPolicy};
