//! Script extraction from completion text.
//!
//! Models are asked for a bare JSON array but often wrap it in prose or a
//! markdown fence. Extraction takes everything from the first `[` to the last
//! `]`, parses it, and falls back to a single script holding the raw text
//! when nothing usable comes out. It never fails.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shortscript_core::ScriptResult;
use tracing::{debug, warn};

/// Content used for array elements without content under [`MissingContentPolicy::Placeholder`].
pub const MISSING_CONTENT_PLACEHOLDER: &str = "No content generated";

/// What to do with array elements that carry no `content`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingContentPolicy {
    /// Drop the element
    #[default]
    Discard,
    /// Keep it with [`MISSING_CONTENT_PLACEHOLDER`] as content
    Placeholder,
}

/// Scripts pulled out of one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    /// Scripts in the order the model returned them
    pub scripts: Vec<ScriptResult>,
    /// True when the raw text was wrapped as a single fallback script
    pub used_fallback: bool,
}

impl Extracted {
    fn fallback(raw: &str) -> Self {
        Self {
            scripts: vec![ScriptResult::fallback(raw)],
            used_fallback: true,
        }
    }
}

/// Extract scripts from raw completion text.
///
/// # Examples
///
/// ```
/// use shortscript_models::{extract_scripts, MissingContentPolicy};
///
/// let raw = r#"Here you go:
/// [{"theme": "早起", "content": "你知道吗……"}]
/// Enjoy!"#;
/// let extracted = extract_scripts(raw, MissingContentPolicy::Discard);
/// assert!(!extracted.used_fallback);
/// assert_eq!(extracted.scripts[0].theme, "早起");
///
/// let prose = extract_scripts("抱歉，我无法完成。", MissingContentPolicy::Discard);
/// assert!(prose.used_fallback);
/// assert_eq!(prose.scripts[0].theme, "Generated Script");
/// assert_eq!(prose.scripts[0].content, "抱歉，我无法完成。");
/// ```
pub fn extract_scripts(raw: &str, policy: MissingContentPolicy) -> Extracted {
    let Some(candidate) = locate_array(raw) else {
        debug!(response_length = raw.len(), "No JSON array in completion");
        return Extracted::fallback(raw);
    };

    let elements: Vec<Value> = match serde_json::from_str(candidate) {
        Ok(elements) => elements,
        Err(e) => {
            warn!(error = %e, "Completion array is not valid JSON, using raw text");
            return Extracted::fallback(raw);
        }
    };

    let total = elements.len();
    let scripts: Vec<ScriptResult> = elements
        .iter()
        .enumerate()
        .filter_map(|(index, element)| to_script(index, element, policy))
        .collect();

    if scripts.is_empty() {
        warn!(elements = total, "No usable scripts in completion array");
        return Extracted::fallback(raw);
    }
    if scripts.len() < total {
        debug!(kept = scripts.len(), total, "Discarded elements without content");
    }

    Extracted {
        scripts,
        used_fallback: false,
    }
}

/// First `[` through last `]`.
fn locate_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    (end > start).then(|| &raw[start..=end])
}

fn to_script(index: usize, element: &Value, policy: MissingContentPolicy) -> Option<ScriptResult> {
    let empty = Map::new();
    let object = element.as_object().unwrap_or(&empty);

    let content = match non_blank(object, "content") {
        Some(content) => content.to_string(),
        None => match policy {
            MissingContentPolicy::Discard => return None,
            MissingContentPolicy::Placeholder => MISSING_CONTENT_PLACEHOLDER.to_string(),
        },
    };
    let theme = non_blank(object, "theme")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Theme {}", index + 1));

    let script = ScriptResult::new(theme, content);
    Some(match non_blank(object, "hook") {
        Some(hook) => script.with_hook(hook),
        None => script,
    })
}

fn non_blank<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_array_is_found() {
        let raw = "```json\n[{\"theme\":\"A\",\"content\":\"a\"},{\"theme\":\"B\",\"content\":\"b\"}]\n```";
        let extracted = extract_scripts(raw, MissingContentPolicy::Discard);
        let themes: Vec<&str> = extracted.scripts.iter().map(|s| s.theme.as_str()).collect();
        assert_eq!(themes, vec!["A", "B"]);
    }

    #[test]
    fn missing_theme_gets_positional_name() {
        let raw = r#"[{"content":"x"},{"theme":"","content":"y"}]"#;
        let extracted = extract_scripts(raw, MissingContentPolicy::Discard);
        assert_eq!(extracted.scripts[0].theme, "Theme 1");
        assert_eq!(extracted.scripts[1].theme, "Theme 2");
    }

    #[test]
    fn missing_content_follows_policy() {
        let raw = r#"[{"theme":"A"},{"theme":"B","content":"b"}]"#;

        let discarded = extract_scripts(raw, MissingContentPolicy::Discard);
        assert_eq!(discarded.scripts.len(), 1);
        assert_eq!(discarded.scripts[0].theme, "B");

        let kept = extract_scripts(raw, MissingContentPolicy::Placeholder);
        assert_eq!(kept.scripts.len(), 2);
        assert_eq!(kept.scripts[0].content, MISSING_CONTENT_PLACEHOLDER);
    }

    #[test]
    fn array_without_usable_elements_falls_back() {
        let raw = r#"[{"theme":"A"}]"#;
        let extracted = extract_scripts(raw, MissingContentPolicy::Discard);
        assert!(extracted.used_fallback);
        assert_eq!(extracted.scripts[0].content, raw);
    }

    #[test]
    fn empty_array_falls_back() {
        assert!(extract_scripts("[]", MissingContentPolicy::Placeholder).used_fallback);
    }

    #[test]
    fn broken_json_falls_back() {
        let raw = "[{\"theme\": \"A\", \"content\": ]";
        let extracted = extract_scripts(raw, MissingContentPolicy::Discard);
        assert!(extracted.used_fallback);
        assert_eq!(extracted.scripts[0].content, raw);
    }

    #[test]
    fn reversed_brackets_fall_back() {
        assert!(extract_scripts("] then [", MissingContentPolicy::Discard).used_fallback);
    }

    #[test]
    fn hook_is_kept_when_present() {
        let raw = r#"[{"theme":"A","hook":"你敢信？","content":"a"},{"theme":"B","hook":"","content":"b"}]"#;
        let extracted = extract_scripts(raw, MissingContentPolicy::Discard);
        assert_eq!(extracted.scripts[0].hook.as_deref(), Some("你敢信？"));
        assert_eq!(extracted.scripts[1].hook, None);
    }

    #[test]
    fn non_object_elements_have_no_content() {
        let raw = r#"["just text", {"theme":"A","content":"a"}]"#;
        let extracted = extract_scripts(raw, MissingContentPolicy::Placeholder);
        assert_eq!(extracted.scripts[0].theme, "Theme 1");
        assert_eq!(extracted.scripts[0].content, MISSING_CONTENT_PLACEHOLDER);
    }
}
