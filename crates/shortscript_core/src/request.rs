//! Generation request types.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use shortscript_error::{BuilderError, GenerationError, GenerationErrorKind, GenerationResult};

/// Word-count range used when the caller does not pick one.
pub const DEFAULT_WORD_COUNT_RANGE: &str = "300-500";

/// Background material rendered into the prompt but never copied verbatim.
///
/// # Examples
///
/// ```
/// use shortscript_core::ReferenceMaterial;
///
/// let material = ReferenceMaterial::new("Industry report", "Key figures", "引用数据");
/// assert_eq!(material.title, "Industry report");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceMaterial {
    /// Heading shown above the material
    pub title: String,
    /// Body of the material
    pub content: String,
    /// Why the material is supplied
    pub purpose: String,
}

impl ReferenceMaterial {
    /// Create a reference material.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            purpose: purpose.into(),
        }
    }
}

/// Everything the prompt builder needs to ask for a set of scripts.
///
/// The source content must be non-blank and at least one script must be
/// requested. Style and platform are free-form tags; tags the prompt catalog
/// does not know render as empty instructions.
///
/// # Examples
///
/// ```
/// use shortscript_core::GenerationRequest;
///
/// let request = GenerationRequest::builder()
///     .source_content("一篇关于早起的长文……")
///     .script_count(2)
///     .word_count_range("300-500")
///     .style("storytelling")
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.script_count(), 2);
/// assert_eq!(request.style().as_deref(), Some("storytelling"));
///
/// let empty = GenerationRequest::builder()
///     .source_content("   ")
///     .script_count(1)
///     .build();
/// assert!(empty.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct GenerationRequest {
    /// Long-form article to repurpose
    #[builder(setter(into))]
    source_content: String,

    /// Number of distinct scripts to ask for
    script_count: u32,

    /// Target length per script, e.g. "300-500"
    #[builder(setter(into), default = "DEFAULT_WORD_COUNT_RANGE.to_string()")]
    #[serde(default = "default_word_count_range")]
    word_count_range: String,

    /// Style tag such as "conversational"
    #[builder(setter(into, strip_option), default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    style: Option<String>,

    /// Platform tag such as "douyin"
    #[builder(setter(into, strip_option), default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform: Option<String>,

    /// Ordered background materials
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    reference_materials: Vec<ReferenceMaterial>,

    /// Persona override for the system message
    #[builder(setter(into, strip_option), default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    system_prompt: Option<String>,
}

fn default_word_count_range() -> String {
    DEFAULT_WORD_COUNT_RANGE.to_string()
}

impl GenerationRequest {
    /// Creates a new builder for `GenerationRequest`.
    pub fn builder() -> GenerationRequestBuilder {
        GenerationRequestBuilder::default()
    }

    /// Re-check the data-model invariant.
    ///
    /// Requests built through the builder already satisfy it; requests read
    /// back from a queue file may not.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the source content is blank or no script
    /// is requested.
    pub fn validate(&self) -> GenerationResult<()> {
        check_invariant(Some(&self.source_content), Some(self.script_count))
            .map_err(|msg| GenerationError::new(GenerationErrorKind::InvalidRequest(msg)))
    }
}

impl GenerationRequestBuilder {
    fn validate(&self) -> Result<(), String> {
        check_invariant(self.source_content.as_ref(), self.script_count)
    }
}

fn check_invariant(source: Option<&String>, count: Option<u32>) -> Result<(), String> {
    if source.is_some_and(|s| s.trim().is_empty()) {
        return Err("source content must not be empty".to_string());
    }
    if count == Some(0) {
        return Err("script count must be at least 1".to_string());
    }
    Ok(())
}

impl From<GenerationRequestBuilderError> for BuilderError {
    #[track_caller]
    fn from(err: GenerationRequestBuilderError) -> Self {
        BuilderError::from(err.to_string())
    }
}
