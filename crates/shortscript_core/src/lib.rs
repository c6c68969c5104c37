//! Core data types for shortscript.
//!
//! This crate provides the data model shared by the prompt builder, the
//! completion client and the collaborators that persist results.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod completion;
mod message;
mod request;
mod role;
mod script;

pub use completion::{CompletionRequest, TokenUsage};
pub use message::ChatMessage;
pub use request::{
    DEFAULT_WORD_COUNT_RANGE, GenerationRequest, GenerationRequestBuilder,
    GenerationRequestBuilderError, ReferenceMaterial,
};
pub use role::Role;
pub use script::{FALLBACK_THEME, GenerationResponse, ScriptResult};
