//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shortscript - turn long-form content into Chinese short-video scripts
#[derive(Parser, Debug)]
#[command(name = "shortscript")]
#[command(about = "Turn long-form content into Chinese short-video scripts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file (defaults to the layered shortscript.toml lookup)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate scripts for one source file
    Generate {
        /// Request options
        #[command(flatten)]
        request: RequestArgs,

        /// Post-process each script for the requested platform
        #[arg(long)]
        format_for_platform: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        output: OutputFormat,
    },

    /// Add a request to the work queue
    Submit {
        /// Request options
        #[command(flatten)]
        request: RequestArgs,
    },

    /// Process every pending request in the work queue
    Batch {
        /// Notify this recipient once the document is exported
        #[arg(long)]
        notify: Option<String>,

        /// Skip the Markdown export
        #[arg(long)]
        no_export: bool,
    },

    /// Export stored scripts as a Markdown document
    Export {
        /// Only export scripts of this request
        #[arg(long)]
        request_id: Option<String>,
    },

    /// Test the connection and API key
    Ping,

    /// Show statistics and keywords of a source file
    Analyze {
        /// Source file
        #[arg(long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "human")]
        output: OutputFormat,
    },

    /// Print the prompts a request would send, without calling the API
    Prompt {
        /// Request options
        #[command(flatten)]
        request: RequestArgs,
    },
}

/// Options shared by every command that builds a generation request
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Source file holding the long-form content
    #[arg(long)]
    pub input: PathBuf,

    /// Number of scripts to generate
    #[arg(long, default_value = "3")]
    pub count: u32,

    /// Target length per script
    #[arg(long, default_value = "300-500")]
    pub words: String,

    /// Narration style (conversational, storytelling, educational, controversial)
    #[arg(long)]
    pub style: Option<String>,

    /// Target platform (douyin, xiaohongshu, bilibili)
    #[arg(long)]
    pub platform: Option<String>,

    /// Reference material as `title:purpose:file`, repeatable
    #[arg(long = "reference")]
    pub references: Vec<String>,

    /// Replace the default system prompt
    #[arg(long)]
    pub system_prompt: Option<String>,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_accepts_repeated_references() {
        let cli = Cli::try_parse_from([
            "shortscript",
            "generate",
            "--input",
            "article.txt",
            "--count",
            "2",
            "--platform",
            "douyin",
            "--reference",
            "a:背景:a.txt",
            "--reference",
            "b:数据:b.txt",
            "--format-for-platform",
            "--output",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                request,
                format_for_platform,
                output,
            } => {
                assert_eq!(request.count, 2);
                assert_eq!(request.words, "300-500");
                assert_eq!(request.platform.as_deref(), Some("douyin"));
                assert_eq!(request.references.len(), 2);
                assert!(format_for_platform);
                assert_eq!(output, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli =
            Cli::try_parse_from(["shortscript", "ping", "--verbose", "--config", "my.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
    }
}
