//! Prompt rendering.

use crate::{PromptCatalog, truncate_source};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shortscript_core::{CompletionRequest, GenerationRequest, ReferenceMaterial};
use shortscript_error::GenerationResult;
use tracing::{debug, instrument};

/// Persona used when a request does not override the system prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert short video script writer specializing in viral content creation. You understand narrative hooks, engagement patterns, and how to adapt long-form content into compelling short scripts.";

const REFERENCE_NOTICE: &str = "注意：参考资料仅作为背景信息，不要直接照搬原文。";
const GENERIC_PLATFORM_FIT: &str = "适合在抖音、小红书等平台发布";
const TAILORED_PLATFORM_FIT: &str = "融入平台特色和目标用户喜好";

/// System and user prompts for one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPrompt {
    /// Persona text for the system message
    pub system: String,
    /// Task text for the user message
    pub user: String,
}

/// Model and sampling settings combined with a rendered prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ModelSettings {
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ModelSettings {
    /// Create settings. Bounds are checked when the completion request is built.
    pub fn new(model: impl Into<String>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: model.into(),
            temperature,
            max_tokens,
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self::new("deepseek-chat", 0.7, 4000)
    }
}

/// Renders generation requests into prompts.
///
/// # Examples
///
/// ```
/// use shortscript_core::GenerationRequest;
/// use shortscript_prompt::{PromptBuilder, DEFAULT_SYSTEM_PROMPT};
///
/// let request = GenerationRequest::builder()
///     .source_content("关于时间管理的一篇长文")
///     .script_count(2)
///     .build()
///     .unwrap();
///
/// let prompt = PromptBuilder::default().build(&request).unwrap();
/// assert_eq!(prompt.system, DEFAULT_SYSTEM_PROMPT);
/// assert!(prompt.user.contains("提取2个不同的主题"));
/// assert!(prompt.user.contains("300-500字"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    catalog: PromptCatalog,
}

impl PromptBuilder {
    /// Create a builder over the given catalog.
    pub fn new(catalog: PromptCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog used for style and platform lookups.
    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }

    /// Render the system and user prompts for a request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the source content is blank or no script is requested.
    #[instrument(skip(self, request), fields(script_count = *request.script_count()))]
    pub fn build(&self, request: &GenerationRequest) -> GenerationResult<RenderedPrompt> {
        request.validate()?;

        let system = request
            .system_prompt()
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
            .to_string();
        let user = self.render_user(request);

        debug!(
            system_len = system.len(),
            user_len = user.len(),
            "Rendered prompt"
        );
        Ok(RenderedPrompt { system, user })
    }

    /// Render the prompt and pair it with model settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for an invalid request or out-of-range settings.
    pub fn completion_request(
        &self,
        request: &GenerationRequest,
        settings: &ModelSettings,
    ) -> GenerationResult<CompletionRequest> {
        let prompt = self.build(request)?;
        CompletionRequest::new(
            settings.model(),
            prompt.system,
            prompt.user,
            *settings.temperature(),
            *settings.max_tokens(),
        )
    }

    fn render_user(&self, request: &GenerationRequest) -> String {
        let count = request.script_count();
        let range = request.word_count_range();
        let style = request.style().as_deref();
        let platform = request.platform().as_deref();

        let mut out = format!(
            "你是一个短视频脚本创作专家。请根据以下内容，提取{}个不同的主题，并为每个主题生成一个{}字的短视频脚本。\n\n",
            count, range
        );

        out.push_str("源内容：\n");
        out.push_str(&truncate_source(request.source_content()).render());
        out.push_str("\n\n");

        if !request.reference_materials().is_empty() {
            out.push_str(&render_references(request.reference_materials()));
        }

        if style.is_some() || platform.is_some() {
            if let Some(tag) = style {
                out.push_str(&format!(
                    "风格要求：{}\n",
                    self.catalog.style_instruction(tag)
                ));
            }
            if let Some(tag) = platform {
                out.push_str(&format!(
                    "平台特点：{}\n",
                    self.catalog.platform_guidance(tag)
                ));
            }
            out.push('\n');
        }

        let platform_fit = if platform.is_some() {
            TAILORED_PLATFORM_FIT
        } else {
            GENERIC_PLATFORM_FIT
        };
        out.push_str("要求：\n");
        out.push_str("1. 提取的主题要有差异性，覆盖不同角度\n");
        out.push_str("2. 每个脚本要适合口播，语言要口语化、接地气\n");
        out.push_str("3. 开头必须有强钩子，能在3秒内吸引观众\n");
        out.push_str("4. 结构：钩子→故事/观点→转折→结论\n");
        out.push_str("5. 多用短句，避免长难句\n");
        out.push_str(&format!("6. 每个脚本控制在{}字\n", range));
        out.push_str(&format!("7. {}\n\n", platform_fit));

        out.push_str("请严格按以下JSON格式返回：\n[\n  {\n");
        out.push_str("    \"theme\": \"主题名称（10字以内）\",\n");
        if style.is_some() || platform.is_some() {
            out.push_str("    \"hook\": \"开头钩子（一句话）\",\n");
        }
        out.push_str("    \"content\": \"完整的脚本内容\"\n  }\n]\n\n");
        out.push_str("只返回JSON，不要有其他说明文字。");
        out
    }
}

fn render_references(materials: &[ReferenceMaterial]) -> String {
    let mut out = String::from("参考资料：\n");
    for (index, material) in materials.iter().enumerate() {
        out.push_str(&format!(
            "【参考资料{}：{}】\n用途：{}\n{}\n\n",
            index + 1,
            material.title,
            material.purpose,
            material.content
        ));
    }
    out.push_str(REFERENCE_NOTICE);
    out.push_str("\n\n");
    out
}
