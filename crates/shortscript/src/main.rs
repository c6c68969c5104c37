//! Shortscript CLI binary.
//!
//! This binary provides command-line access to shortscript's functionality:
//! - Generate scripts from a source file
//! - Queue requests and process them in a paced batch
//! - Export stored scripts as Markdown
//! - Inspect prompts and source content without calling the API

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{
        Cli, Commands, analyze_source, export_results, generate_scripts, ping_provider,
        print_prompt, run_batch, submit_request,
    };

    // Parse command-line arguments
    let cli = Cli::parse();

    // API keys may live in a local .env file
    dotenvy::dotenv().ok();

    let log_level = if cli.verbose { "debug" } else { "info" };

    #[cfg(feature = "observability")]
    let telemetry = shortscript::observability::init_observability(
        shortscript::observability::ObservabilityConfig::default()
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs),
    )?;

    #[cfg(not(feature = "observability"))]
    init_logging(log_level, cli.json_logs)?;

    let config = cli.config.as_deref();

    // Execute the requested command
    let result = match &cli.command {
        Commands::Generate {
            request,
            format_for_platform,
            output,
        } => generate_scripts(config, request, *format_for_platform, *output).await,

        Commands::Submit { request } => submit_request(config, request).await,

        Commands::Batch { notify, no_export } => {
            run_batch(config, notify.as_deref(), *no_export).await
        }

        Commands::Export { request_id } => export_results(config, request_id.as_deref()).await,

        Commands::Ping => ping_provider(config).await,

        Commands::Analyze { input, output } => analyze_source(input, *output).await,

        Commands::Prompt { request } => print_prompt(config, request).await,
    };

    #[cfg(feature = "observability")]
    telemetry.shutdown();

    result?;
    Ok(())
}

#[cfg(not(feature = "observability"))]
fn init_logging(level: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
    Ok(())
}
