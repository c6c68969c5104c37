//! Source-content truncation.

/// Maximum number of source characters placed in a prompt.
pub const SOURCE_CHAR_LIMIT: usize = 3000;

/// Appended after the kept prefix when the source was cut.
pub const TRUNCATION_MARKER: &str = "...(内容已截断)";

/// Source content bounded to [`SOURCE_CHAR_LIMIT`] characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncatedSource<'a> {
    /// The kept prefix
    pub kept: &'a str,
    /// Whether anything was dropped
    pub truncated: bool,
}

impl TruncatedSource<'_> {
    /// The prompt line: the kept prefix, a space, then the marker when truncated.
    ///
    /// The space is always present so output matches the deployed service byte for byte.
    pub fn render(&self) -> String {
        let marker = if self.truncated { TRUNCATION_MARKER } else { "" };
        format!("{} {}", self.kept, marker)
    }
}

/// Keep at most [`SOURCE_CHAR_LIMIT`] characters of `content`.
///
/// Characters are Unicode scalar values, so CJK text is never split mid-character.
///
/// # Examples
///
/// ```
/// use shortscript_prompt::{truncate_source, TRUNCATION_MARKER};
///
/// let short = truncate_source("短文");
/// assert!(!short.truncated);
/// assert_eq!(short.render(), "短文 ");
///
/// let long = "字".repeat(3001);
/// let cut = truncate_source(&long);
/// assert!(cut.truncated);
/// assert_eq!(cut.kept.chars().count(), 3000);
/// assert!(cut.render().ends_with(TRUNCATION_MARKER));
/// ```
pub fn truncate_source(content: &str) -> TruncatedSource<'_> {
    match content.char_indices().nth(SOURCE_CHAR_LIMIT) {
        Some((byte_index, _)) => TruncatedSource {
            kept: &content[..byte_index],
            truncated: true,
        },
        None => TruncatedSource {
            kept: content,
            truncated: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_at_limit_is_not_truncated() {
        let content = "a".repeat(SOURCE_CHAR_LIMIT);
        let result = truncate_source(&content);
        assert!(!result.truncated);
        assert_eq!(result.kept.len(), SOURCE_CHAR_LIMIT);
    }

    #[test]
    fn multibyte_prefix_is_char_exact() {
        let content = format!("{}{}", "中".repeat(SOURCE_CHAR_LIMIT), "尾巴");
        let result = truncate_source(&content);
        assert!(result.truncated);
        assert_eq!(result.kept, "中".repeat(SOURCE_CHAR_LIMIT));
    }
}
