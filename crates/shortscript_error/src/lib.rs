//! Error types for shortscript.
//!
//! This crate provides the foundation error types used throughout the shortscript workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use shortscript_error::{GenerationError, GenerationErrorKind, ShortscriptResult};
//!
//! fn load_key() -> ShortscriptResult<String> {
//!     Err(GenerationError::new(GenerationErrorKind::MissingCredential(
//!         "DEEPSEEK_API_KEY".to_string(),
//!     )))?
//! }
//!
//! match load_key() {
//!     Ok(key) => println!("Got key of length {}", key.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod generation;
mod json;
mod storage;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{ShortscriptError, ShortscriptErrorKind, ShortscriptResult};
pub use generation::{GenerationError, GenerationErrorKind, GenerationResult, RetryableError};
pub use json::JsonError;
pub use storage::{StorageError, StorageErrorKind};
