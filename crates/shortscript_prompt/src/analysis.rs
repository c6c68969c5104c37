//! Lightweight source-content analysis.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

const STOP_WORDS: [&str; 15] = [
    "的", "了", "和", "是", "在", "我", "有", "个", "不", "这", "为", "之", "与", "也", "到",
];
const KEYWORD_LIMIT: usize = 10;

static CJK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{4e00}-\u{9fa5}]+").expect("Valid CJK run regex"));
static QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["'“”‘’]"#).expect("Valid quote regex"));

/// Summary statistics of a source article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    /// Length in characters
    pub length: usize,
    /// Number of blank-line separated paragraphs
    pub paragraphs: usize,
    /// Whether any ASCII digit appears
    pub has_numbers: bool,
    /// Whether any quotation mark appears
    pub has_quotes: bool,
    /// Most frequent CJK runs, most frequent first
    pub keywords: Vec<String>,
}

/// Analyze source content before generating from it.
///
/// Keywords are contiguous runs of CJK ideographs at least two characters
/// long, excluding stop words, ranked by frequency. Equal counts keep the
/// order of first appearance.
///
/// # Examples
///
/// ```
/// use shortscript_prompt::analyze_content;
///
/// let analysis = analyze_content("早起 早起 习惯\n\n2024年");
/// assert_eq!(analysis.paragraphs, 2);
/// assert!(analysis.has_numbers);
/// assert_eq!(analysis.keywords, vec!["早起", "习惯"]);
/// ```
pub fn analyze_content(text: &str) -> ContentAnalysis {
    ContentAnalysis {
        length: text.chars().count(),
        paragraphs: text.split("\n\n").count(),
        has_numbers: text.chars().any(|c| c.is_ascii_digit()),
        has_quotes: QUOTE.is_match(text),
        keywords: extract_keywords(text),
    }
}

fn extract_keywords(text: &str) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for run in CJK_RUN.find_iter(text).map(|m| m.as_str()) {
        if run.chars().count() < 2 || STOP_WORDS.contains(&run) {
            continue;
        }
        let count = counts.entry(run).or_insert(0);
        if *count == 0 {
            order.push(run);
        }
        *count += 1;
    }

    // Stable sort keeps first-appearance order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
        .into_iter()
        .take(KEYWORD_LIMIT)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_first_appearance() {
        let keywords = extract_keywords("甲乙，丙丁，戊己，丙丁");
        assert_eq!(keywords, vec!["丙丁", "甲乙", "戊己"]);
    }

    #[test]
    fn single_characters_and_latin_are_ignored() {
        let analysis = analyze_content("我 hello 世界");
        assert_eq!(analysis.keywords, vec!["世界"]);
        assert!(!analysis.has_quotes);
        assert!(!analysis.has_numbers);
    }

    #[test]
    fn keywords_are_capped() {
        let text: String = (0..15)
            .map(|i| format!("{}{}，", char::from_u32(0x4e00 + i * 2).unwrap(), "字"))
            .collect();
        assert_eq!(extract_keywords(&text).len(), KEYWORD_LIMIT);
    }

    #[test]
    fn curly_quotes_count() {
        assert!(analyze_content("他说“你好”").has_quotes);
    }
}
