//! Tests for the configuration system.

use shortscript_rate_limit::{RetryPolicy, ShortscriptConfig};
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_bundled_defaults() {
    let config = ShortscriptConfig::load().unwrap();

    assert_eq!(config.provider.name, "deepseek");
    assert_eq!(config.provider.max_tokens, 4000);
    assert_eq!(config.retry.to_policy().unwrap(), RetryPolicy::default());
    assert_eq!(config.batch.delay(), Duration::from_millis(2000));
}

#[test]
fn test_partial_file_falls_back_to_defaults() {
    let file = write_config(
        r#"
[provider]
name = "groq"
temperature = 0.3

[retry]
max_attempts = 5
"#,
    );

    let config = ShortscriptConfig::from_file(file.path()).unwrap();
    assert_eq!(config.provider.name, "groq");
    assert_eq!(config.provider.temperature, 0.3);
    assert_eq!(config.provider.max_tokens, 4000);
    assert_eq!(config.retry.max_attempts, 5);
    assert_eq!(config.retry.base_delay_ms, 2000);
    assert_eq!(config.storage.export_dir.to_str(), Some("exports"));
}

#[test]
fn test_zero_attempts_rejected_when_building_policy() {
    let file = write_config("[retry]\nmax_attempts = 0\n");
    let config = ShortscriptConfig::from_file(file.path()).unwrap();
    assert!(config.retry.to_policy().is_err());
}

#[test]
fn test_catalog_override() {
    let file = write_config(
        r#"
[catalog.styles.poetic]
name = "诗意"
instruction = "语言优美，有韵律感"
"#,
    );

    let config = ShortscriptConfig::from_file(file.path()).unwrap();
    let catalog = config.catalog();
    assert_eq!(catalog.style_instruction("poetic"), "语言优美，有韵律感");
    assert_eq!(catalog.style_instruction("conversational"), "");
}

#[test]
fn test_missing_catalog_uses_builtin_tables() {
    let config = ShortscriptConfig::default();
    assert_eq!(
        config.catalog().platform_guidance("douyin"),
        "强钩子，快节奏，情绪化"
    );
}

#[test]
fn test_model_settings_prefer_configured_model() {
    let file = write_config("[provider]\nmodel = \"deepseek-reasoner\"\n");
    let config = ShortscriptConfig::from_file(file.path()).unwrap();
    let settings = config.provider.model_settings("deepseek-chat");
    assert_eq!(settings.model(), "deepseek-reasoner");

    let defaults = ShortscriptConfig::default();
    assert_eq!(
        defaults.provider.model_settings("deepseek-chat").model(),
        "deepseek-chat"
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let result = ShortscriptConfig::from_file("/nonexistent/shortscript.toml");
    assert!(result.is_err());
}
