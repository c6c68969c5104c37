//! Generated script types.

use crate::TokenUsage;
use serde::{Deserialize, Serialize};

/// Theme given to the single script produced when a completion cannot be parsed.
pub const FALLBACK_THEME: &str = "Generated Script";

/// One generated short-video script.
///
/// # Examples
///
/// ```
/// use shortscript_core::ScriptResult;
///
/// let script = ScriptResult::new("早起", "朋友们，你有没有想过……").with_hook("三秒钩子");
/// assert_eq!(script.hook.as_deref(), Some("三秒钩子"));
/// assert_eq!(script.word_count(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptResult {
    /// Short theme title
    pub theme: String,
    /// Opening hook sentence, when the model supplied one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    /// Full script text
    pub content: String,
}

impl ScriptResult {
    /// Create a script without a hook.
    pub fn new(theme: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            hook: None,
            content: content.into(),
        }
    }

    /// Attach an opening hook.
    pub fn with_hook(mut self, hook: impl Into<String>) -> Self {
        self.hook = Some(hook.into());
        self
    }

    /// The fallback script wrapping an unparseable completion verbatim.
    pub fn fallback(raw: impl Into<String>) -> Self {
        Self::new(FALLBACK_THEME, raw)
    }

    /// Length of the script in characters.
    ///
    /// Scripts are mostly Chinese, where characters are the unit of length.
    pub fn word_count(&self) -> usize {
        self.content.chars().count()
    }
}

/// Outcome of one successful generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Scripts in the order the model returned them
    pub scripts: Vec<ScriptResult>,
    /// HTTP attempts made, including the successful one
    pub attempts: u32,
    /// True when the completion text could not be parsed and was wrapped as one script
    pub used_fallback: bool,
    /// Model that served the request
    pub model: String,
    /// Token usage, when the provider reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}
