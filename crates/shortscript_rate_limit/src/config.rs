//! TOML configuration.

use crate::RetryPolicy;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use shortscript_error::{ConfigError, ShortscriptError, ShortscriptResult};
use shortscript_prompt::{ModelSettings, PromptCatalog};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Which provider to call and how to sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Provider name: "deepseek", "openai", "groq", or any name with `endpoint` set
    #[serde(default = "default_provider_name")]
    pub name: String,
    /// Model override; the provider default is used when absent
    #[serde(default)]
    pub model: Option<String>,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Upper bound on generated tokens
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// HTTP timeout per attempt
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Endpoint for a custom OpenAI-compatible provider
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Credential name for a custom provider
    #[serde(default)]
    pub credential_key: Option<String>,
}

fn default_provider_name() -> String {
    "deepseek".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: default_provider_name(),
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            endpoint: None,
            credential_key: None,
        }
    }
}

impl ProviderSettings {
    /// Per-attempt HTTP timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Sampling settings for the prompt builder, using `fallback_model` when no model is configured.
    pub fn model_settings(&self, fallback_model: &str) -> ModelSettings {
        let model = self.model.as_deref().unwrap_or(fallback_model);
        ModelSettings::new(model, self.temperature, self.max_tokens)
    }
}

/// Retry section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Total attempts per call
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Linear backoff unit in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    RetryPolicy::DEFAULT_MAX_ATTEMPTS
}

fn default_base_delay_ms() -> u64 {
    2000
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl RetrySettings {
    /// Build the retry policy.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `max_attempts` is zero.
    pub fn to_policy(&self) -> ShortscriptResult<RetryPolicy> {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.base_delay_ms))
    }
}

/// Batch pacing section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Pause between consecutive batch items in milliseconds
    #[serde(default = "default_batch_delay_ms")]
    pub delay_ms: u64,
}

fn default_batch_delay_ms() -> u64 {
    2000
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            delay_ms: default_batch_delay_ms(),
        }
    }
}

impl BatchSettings {
    /// Pause between consecutive batch items.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Where the file-backed collaborators keep their data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// JSON file holding the work queue
    #[serde(default = "default_queue_path")]
    pub queue_path: PathBuf,
    /// JSON Lines file holding generated scripts
    #[serde(default = "default_results_path")]
    pub results_path: PathBuf,
    /// Directory for exported Markdown documents
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn default_queue_path() -> PathBuf {
    PathBuf::from("shortscript-queue.json")
}

fn default_results_path() -> PathBuf {
    PathBuf::from("shortscript-results.jsonl")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("exports")
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            queue_path: default_queue_path(),
            results_path: default_results_path(),
            export_dir: default_export_dir(),
        }
    }
}

/// Complete shortscript configuration.
///
/// Every section is optional in a user file; missing values fall back to
/// the bundled defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortscriptConfig {
    /// Provider and sampling
    #[serde(default)]
    pub provider: ProviderSettings,
    /// Retry policy
    #[serde(default)]
    pub retry: RetrySettings,
    /// Batch pacing
    #[serde(default)]
    pub batch: BatchSettings,
    /// File locations
    #[serde(default)]
    pub storage: StorageSettings,
    /// Replacement style and platform tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PromptCatalog>,
}

impl ShortscriptConfig {
    /// Load configuration from a single file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ShortscriptResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ShortscriptError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ShortscriptError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// Sources in order (later sources override earlier):
    /// 1. Bundled defaults (shortscript.toml shipped with the library)
    /// 2. `~/.config/shortscript/shortscript.toml`
    /// 3. `./shortscript.toml`
    ///
    /// User files are optional and skipped silently when absent.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shortscript_rate_limit::ShortscriptConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ShortscriptConfig::load()?;
    /// println!("{}", config.provider.name);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> ShortscriptResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../shortscript.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/shortscript/shortscript.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("shortscript").required(false));

        builder
            .build()
            .map_err(|e| {
                ShortscriptError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ShortscriptError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// The prompt catalog: the configured override or the built-in tables.
    pub fn catalog(&self) -> PromptCatalog {
        self.catalog.clone().unwrap_or_default()
    }
}
