//! Style and platform lookup tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Wording injected for a style tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTemplate {
    /// Human-readable label
    pub name: String,
    /// Instruction placed after `风格要求：`
    pub instruction: String,
}

/// Conventions for a publishing platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
    /// Human-readable label
    pub name: String,
    /// Customary word-count range on the platform
    pub word_count: String,
    /// Tonal guidance placed after `平台特点：`
    pub style: String,
}

/// Styles shipped with the default catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum BuiltinStyle {
    /// Chatty, addresses the audience as friends
    Conversational,
    /// Opens with a concrete anecdote
    Storytelling,
    /// Leans on data and facts
    Educational,
    /// States a sharp opinion
    Controversial,
}

impl BuiltinStyle {
    /// Default template for this style.
    pub fn template(self) -> StyleTemplate {
        let (name, instruction) = match self {
            BuiltinStyle::Conversational => (
                "对话式 Conversational",
                "用'兄弟'或'朋友们'开头，像朋友聊天一样自然",
            ),
            BuiltinStyle::Storytelling => (
                "故事式 Story-based",
                "从一个具体的故事或案例开始，有画面感",
            ),
            BuiltinStyle::Educational => (
                "科普式 Educational",
                "用数据和事实说话，逻辑清晰，适合知识分享",
            ),
            BuiltinStyle::Controversial => ("观点式 Opinion", "提出犀利观点，引发思考和讨论"),
        };
        StyleTemplate {
            name: name.to_string(),
            instruction: instruction.to_string(),
        }
    }
}

/// Platforms shipped with the default catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum BuiltinPlatform {
    /// Douyin
    Douyin,
    /// XiaoHongShu
    Xiaohongshu,
    /// Bilibili
    Bilibili,
}

impl BuiltinPlatform {
    /// Default settings for this platform.
    pub fn settings(self) -> PlatformSettings {
        let (name, word_count, style) = match self {
            BuiltinPlatform::Douyin => ("抖音 Douyin", "300-500", "强钩子，快节奏，情绪化"),
            BuiltinPlatform::Xiaohongshu => (
                "小红书 XiaoHongShu",
                "500-800",
                "干货分享，个人经验，生活化",
            ),
            BuiltinPlatform::Bilibili => (
                "B站 Bilibili",
                "800-1200",
                "深度内容，知识密度高，可以有梗",
            ),
        };
        PlatformSettings {
            name: name.to_string(),
            word_count: word_count.to_string(),
            style: style.to_string(),
        }
    }
}

/// Read-only style and platform tables handed to the prompt builder.
///
/// Unknown tags are not errors: they resolve to an empty instruction.
///
/// # Examples
///
/// ```
/// use shortscript_prompt::PromptCatalog;
///
/// let catalog = PromptCatalog::default();
/// assert_eq!(catalog.style_instruction("educational"), "用数据和事实说话，逻辑清晰，适合知识分享");
/// assert_eq!(catalog.platform_guidance("bilibili"), "深度内容，知识密度高，可以有梗");
/// assert_eq!(catalog.style_instruction("no-such-style"), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCatalog {
    /// Style tag to template
    #[serde(default)]
    pub styles: BTreeMap<String, StyleTemplate>,
    /// Platform tag to settings
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformSettings>,
}

impl PromptCatalog {
    /// A catalog with no entries; every tag resolves to an empty instruction.
    pub fn empty() -> Self {
        Self {
            styles: BTreeMap::new(),
            platforms: BTreeMap::new(),
        }
    }

    /// Look up a style template.
    pub fn style(&self, tag: &str) -> Option<&StyleTemplate> {
        self.styles.get(&normalize(tag))
    }

    /// Look up platform settings.
    pub fn platform(&self, tag: &str) -> Option<&PlatformSettings> {
        self.platforms.get(&normalize(tag))
    }

    /// Instruction for a style tag, or `""` when the tag is unknown.
    pub fn style_instruction(&self, tag: &str) -> &str {
        self.style(tag).map(|s| s.instruction.as_str()).unwrap_or("")
    }

    /// Guidance for a platform tag, or `""` when the tag is unknown.
    pub fn platform_guidance(&self, tag: &str) -> &str {
        self.platform(tag).map(|p| p.style.as_str()).unwrap_or("")
    }
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            styles: BuiltinStyle::iter()
                .map(|style| (style.to_string(), style.template()))
                .collect(),
            platforms: BuiltinPlatform::iter()
                .map(|platform| (platform.to_string(), platform.settings()))
                .collect(),
        }
    }
}

fn normalize(tag: &str) -> String {
    tag.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn default_catalog_has_every_builtin() {
        let catalog = PromptCatalog::default();
        assert_eq!(catalog.styles.len(), 4);
        assert_eq!(catalog.platforms.len(), 3);
        assert_eq!(catalog.platform("douyin").unwrap().word_count, "300-500");
        assert_eq!(catalog.platform("xiaohongshu").unwrap().word_count, "500-800");
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        let catalog = PromptCatalog::default();
        assert_eq!(
            catalog.style_instruction(" Storytelling "),
            "从一个具体的故事或案例开始，有画面感"
        );
    }

    #[test]
    fn builtin_tags_parse() {
        assert_eq!(
            BuiltinStyle::from_str("controversial").unwrap(),
            BuiltinStyle::Controversial
        );
        assert_eq!(BuiltinPlatform::Bilibili.as_ref(), "bilibili");
    }

    #[test]
    fn empty_catalog_degrades_silently() {
        let catalog = PromptCatalog::empty();
        assert_eq!(catalog.platform_guidance("douyin"), "");
    }
}
