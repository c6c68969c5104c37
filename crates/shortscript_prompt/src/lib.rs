//! Prompt templating for short-video script generation.
//!
//! [`PromptBuilder`] renders a [`GenerationRequest`](shortscript_core::GenerationRequest)
//! into a system prompt and a user prompt that ask the model for a JSON array
//! of scripts. Rendering is deterministic: the same request always yields
//! byte-identical prompts.
//!
//! Style and platform modifiers come from an explicit [`PromptCatalog`]
//! rather than global tables, so callers can swap in their own wording.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analysis;
mod builder;
mod catalog;
mod truncate;

pub use analysis::{ContentAnalysis, analyze_content};
pub use builder::{DEFAULT_SYSTEM_PROMPT, ModelSettings, PromptBuilder, RenderedPrompt};
pub use catalog::{BuiltinPlatform, BuiltinStyle, PlatformSettings, PromptCatalog, StyleTemplate};
pub use truncate::{SOURCE_CHAR_LIMIT, TRUNCATION_MARKER, TruncatedSource, truncate_source};
