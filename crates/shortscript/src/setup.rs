//! Wiring a completion client from configuration.

use shortscript_error::ShortscriptResult;
use shortscript_interface::CredentialSource;
use shortscript_models::{CompletionClient, CompletionProvider, HttpTransport, Provider};
use shortscript_prompt::PromptBuilder;
use shortscript_rate_limit::ShortscriptConfig;
use tracing::{debug, instrument};

/// Build an HTTP completion client from configuration and a credential source.
///
/// The provider, model settings, retry policy, timeout and prompt catalog
/// all come from `config`; the API key comes from `credentials` under the
/// provider's credential name.
///
/// # Errors
///
/// Returns a configuration error for an unknown provider or invalid retry
/// settings, and `MissingCredential` when no API key is configured.
#[instrument(skip_all, fields(provider = %config.provider.name))]
pub fn client_from_config(
    config: &ShortscriptConfig,
    credentials: &dyn CredentialSource,
) -> ShortscriptResult<CompletionClient<HttpTransport>> {
    let provider = Provider::from_settings(&config.provider)?;
    let policy = config.retry.to_policy()?;
    let transport = HttpTransport::new(config.provider.timeout())?;
    let settings = config.provider.model_settings(provider.default_model());

    debug!(
        model = %settings.model(),
        max_attempts = policy.max_attempts(),
        "Building completion client"
    );

    let client = CompletionClient::from_credentials(provider, credentials, transport, policy)?
        .with_model_settings(settings)
        .with_prompt_builder(PromptBuilder::new(config.catalog()));
    Ok(client)
}
