//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the shortscript binary.

mod commands;
mod generate;
mod queue;
mod request;

pub use commands::{Cli, Commands, OutputFormat, RequestArgs};
pub use generate::{analyze_source, generate_scripts, ping_provider, print_prompt};
pub use queue::{export_results, run_batch, submit_request};

