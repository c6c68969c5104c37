//! Credential sources.

use shortscript_interface::CredentialSource;
use std::collections::HashMap;

/// Reads credentials from process environment variables.
///
/// The CLI loads a `.env` file into the environment before this is consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|value| !value.trim().is_empty())
    }
}

/// Fixed in-memory credentials.
///
/// # Examples
///
/// ```
/// use shortscript_interface::CredentialSource;
/// use shortscript_storage::StaticCredentials;
///
/// let credentials = StaticCredentials::default().with("DEEPSEEK_API_KEY", "sk-123");
/// assert_eq!(credentials.get("DEEPSEEK_API_KEY").as_deref(), Some("sk-123"));
/// assert_eq!(credentials.get("OPENAI_API_KEY"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCredentials {
    values: HashMap<String, String>,
}

impl StaticCredentials {
    /// Add a credential, consuming and returning the source.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a credential.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticCredentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl CredentialSource for StaticCredentials {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .cloned()
    }
}
