//! Single-request command handlers.

use super::request::{build_request, load_config, read_text};
use super::{OutputFormat, RequestArgs};
use shortscript::{
    EnvCredentials, GenerationResponse, JsonError, PromptBuilder, ScriptGenerator,
    ShortscriptError, ShortscriptResult, analyze_content, client_from_config, format_for_platform,
};
use std::path::Path;
use tracing::info;

fn to_pretty_json(value: &impl serde::Serialize) -> ShortscriptResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ShortscriptError::from(JsonError::new(e.to_string())))
}

/// Generate scripts for one source file and print them.
pub async fn generate_scripts(
    config_path: Option<&Path>,
    args: &RequestArgs,
    format: bool,
    output: OutputFormat,
) -> ShortscriptResult<()> {
    let config = load_config(config_path)?;
    let client = client_from_config(&config, &EnvCredentials)?;
    let request = build_request(args).await?;

    let mut response = client.generate(&request).await?;
    if format {
        if let Some(platform) = request.platform() {
            for script in &mut response.scripts {
                script.content = format_for_platform(&script.content, platform);
            }
        }
    }
    info!(
        scripts = response.scripts.len(),
        attempts = response.attempts,
        "Generation finished"
    );

    match output {
        OutputFormat::Json => println!("{}", to_pretty_json(&response)?),
        OutputFormat::Human => print_response(&response),
    }
    Ok(())
}

fn print_response(response: &GenerationResponse) {
    if response.used_fallback {
        println!("(The model did not return a JSON array; showing its raw reply.)");
    }
    for (index, script) in response.scripts.iter().enumerate() {
        println!("{:-<80}", "");
        println!("#{} {}", index + 1, script.theme);
        if let Some(hook) = &script.hook {
            println!("> {}", hook);
        }
        println!();
        println!("{}", script.content);
        println!();
        println!("({} characters)", script.word_count());
    }
    println!("{:-<80}", "");
    println!(
        "Total: {} scripts from {} in {} attempt(s)",
        response.scripts.len(),
        response.model,
        response.attempts
    );
}

/// Send a tiny completion to check the connection and key.
pub async fn ping_provider(config_path: Option<&Path>) -> ShortscriptResult<()> {
    let config = load_config(config_path)?;
    let client = client_from_config(&config, &EnvCredentials)?;
    let reply = client.ping().await?;
    println!("{} ({}): {}", client.provider_name(), client.model_name(), reply);
    Ok(())
}

/// Print statistics and keywords of a source file.
pub async fn analyze_source(input: &Path, output: OutputFormat) -> ShortscriptResult<()> {
    let text = read_text(input).await?;
    let analysis = analyze_content(&text);

    match output {
        OutputFormat::Json => println!("{}", to_pretty_json(&analysis)?),
        OutputFormat::Human => {
            println!("Length:     {} characters", analysis.length);
            println!("Paragraphs: {}", analysis.paragraphs);
            println!("Numbers:    {}", if analysis.has_numbers { "yes" } else { "no" });
            println!("Quotes:     {}", if analysis.has_quotes { "yes" } else { "no" });
            println!("Keywords:   {}", analysis.keywords.join("、"));
        }
    }
    Ok(())
}

/// Print the prompts a request would send, without calling the API.
pub async fn print_prompt(config_path: Option<&Path>, args: &RequestArgs) -> ShortscriptResult<()> {
    let config = load_config(config_path)?;
    let request = build_request(args).await?;
    let prompt = PromptBuilder::new(config.catalog()).build(&request)?;

    println!("[system]\n{}\n", prompt.system);
    println!("[user]\n{}", prompt.user);
    Ok(())
}
