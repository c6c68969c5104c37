//! Per-platform script post-processing.

use shortscript_prompt::BuiltinPlatform;
use std::str::FromStr;

const EMOJI_MAP: [(&str, &str); 8] = [
    ("重要", "⚠️"),
    ("注意", "📌"),
    ("第一", "1️⃣"),
    ("第二", "2️⃣"),
    ("第三", "3️⃣"),
    ("钱", "💰"),
    ("想法", "💡"),
    ("秘密", "🤫"),
];

const CHAPTER_MARKERS: [&str; 4] = ["🎬 开场", "📖 正文", "🎯 重点", "💡 总结"];

/// Adapt script text to a platform's reading conventions.
///
/// - douyin: a line break after every `。`, for teleprompter reading
/// - xiaohongshu: an emoji after selected keywords
/// - bilibili: chapter markers on the first four paragraphs
///
/// Other tags return the text unchanged.
///
/// # Examples
///
/// ```
/// use shortscript_pipeline::format_for_platform;
///
/// assert_eq!(format_for_platform("第一句。第二句。", "douyin"), "第一句。\n第二句。\n");
/// assert_eq!(format_for_platform("省钱的秘密", "xiaohongshu"), "省钱💰的秘密🤫");
/// assert_eq!(format_for_platform("原文", "weibo"), "原文");
/// ```
pub fn format_for_platform(content: &str, platform: &str) -> String {
    match BuiltinPlatform::from_str(&platform.trim().to_lowercase()) {
        Ok(BuiltinPlatform::Douyin) => content.replace('。', "。\n"),
        Ok(BuiltinPlatform::Xiaohongshu) => add_emojis(content),
        Ok(BuiltinPlatform::Bilibili) => add_chapter_markers(content),
        Err(_) => content.to_string(),
    }
}

fn add_emojis(text: &str) -> String {
    EMOJI_MAP
        .iter()
        .fold(text.to_string(), |acc, (word, emoji)| {
            acc.replace(word, &format!("{}{}", word, emoji))
        })
}

fn add_chapter_markers(text: &str) -> String {
    text.split("\n\n")
        .enumerate()
        .map(|(index, paragraph)| match CHAPTER_MARKERS.get(index) {
            Some(marker) => format!("【{}】\n{}", marker, paragraph),
            None => paragraph.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilibili_marks_first_four_paragraphs() {
        let text = "一\n\n二\n\n三\n\n四\n\n五";
        let formatted = format_for_platform(text, "bilibili");
        assert_eq!(
            formatted,
            "【🎬 开场】\n一\n\n【📖 正文】\n二\n\n【🎯 重点】\n三\n\n【💡 总结】\n四\n\n五"
        );
    }

    #[test]
    fn emoji_applies_to_every_occurrence() {
        assert_eq!(
            add_emojis("重要的事说三遍：重要"),
            "重要⚠️的事说三遍：重要⚠️"
        );
    }

    #[test]
    fn platform_tag_is_case_insensitive() {
        assert_eq!(format_for_platform("好。", " Douyin "), "好。\n");
    }
}
