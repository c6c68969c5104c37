//! Rendering tests for the prompt builder.

use shortscript_core::{GenerationRequest, ReferenceMaterial};
use shortscript_prompt::{
    ModelSettings, PromptBuilder, PromptCatalog, PlatformSettings, SOURCE_CHAR_LIMIT,
    TRUNCATION_MARKER,
};

fn base_request(source: &str) -> GenerationRequest {
    GenerationRequest::builder()
        .source_content(source)
        .script_count(2)
        .word_count_range("300-500")
        .build()
        .expect("valid request")
}

#[test]
fn test_rendering_is_deterministic() {
    let request = GenerationRequest::builder()
        .source_content("如何在三十岁之前建立长期习惯")
        .script_count(3)
        .style("storytelling")
        .platform("douyin")
        .reference_materials(vec![ReferenceMaterial::new("报告", "数据", "引用")])
        .build()
        .expect("valid request");
    let builder = PromptBuilder::default();

    let first = builder.build(&request).expect("render");
    let second = builder.build(&request).expect("render");
    assert_eq!(first, second);
}

#[test]
fn test_count_and_range_appear_in_prompt() {
    let prompt = PromptBuilder::default()
        .build(&base_request("一篇长文"))
        .expect("render");

    assert!(prompt.user.contains("2个不同的主题"));
    assert!(prompt.user.contains("300-500字"));
    assert!(prompt.user.contains("6. 每个脚本控制在300-500字"));
    assert!(prompt.user.contains("源内容：\n一篇长文 \n"));
}

#[test]
fn test_long_source_is_truncated_with_marker() {
    let source = "长".repeat(SOURCE_CHAR_LIMIT + 500);
    let prompt = PromptBuilder::default()
        .build(&base_request(&source))
        .expect("render");

    let expected = format!("{} {}", "长".repeat(SOURCE_CHAR_LIMIT), TRUNCATION_MARKER);
    assert!(prompt.user.contains(&expected));
    assert!(!prompt.user.contains(&"长".repeat(SOURCE_CHAR_LIMIT + 1)));
}

#[test]
fn test_short_source_has_no_marker() {
    let prompt = PromptBuilder::default()
        .build(&base_request("短"))
        .expect("render");
    assert!(!prompt.user.contains(TRUNCATION_MARKER));
}

#[test]
fn test_unknown_tags_render_empty_instructions() {
    let request = GenerationRequest::builder()
        .source_content("内容")
        .script_count(1)
        .style("poetic")
        .platform("myspace")
        .build()
        .expect("valid request");

    let prompt = PromptBuilder::default().build(&request).expect("render");
    assert!(prompt.user.contains("风格要求：\n"));
    assert!(prompt.user.contains("平台特点：\n"));
    assert!(prompt.user.contains("\"hook\""));
}

#[test]
fn test_known_tags_render_catalog_text() {
    let request = GenerationRequest::builder()
        .source_content("内容")
        .script_count(1)
        .style("educational")
        .platform("xiaohongshu")
        .build()
        .expect("valid request");

    let prompt = PromptBuilder::default().build(&request).expect("render");
    assert!(prompt.user.contains("风格要求：用数据和事实说话，逻辑清晰，适合知识分享"));
    assert!(prompt.user.contains("平台特点：干货分享，个人经验，生活化"));
    assert!(prompt.user.contains("7. 融入平台特色和目标用户喜好"));
}

#[test]
fn test_references_are_numbered_in_order() {
    let request = GenerationRequest::builder()
        .source_content("内容")
        .script_count(1)
        .reference_materials(vec![
            ReferenceMaterial::new("行业报告", "增长30%", "提供数据"),
            ReferenceMaterial::new("访谈", "创始人说", "补充观点"),
        ])
        .build()
        .expect("valid request");

    let user = PromptBuilder::default().build(&request).expect("render").user;
    let first = user.find("【参考资料1：行业报告】").expect("first reference");
    let second = user.find("【参考资料2：访谈】").expect("second reference");
    let notice = user
        .find("注意：参考资料仅作为背景信息，不要直接照搬原文。")
        .expect("notice");
    let source = user.find("源内容：").expect("source");

    assert!(source < first && first < second && second < notice);
    assert!(user.contains("用途：提供数据\n增长30%"));
}

#[test]
fn test_custom_catalog_is_used() {
    let mut catalog = PromptCatalog::empty();
    catalog.platforms.insert(
        "kuaishou".to_string(),
        PlatformSettings {
            name: "快手".to_string(),
            word_count: "200-400".to_string(),
            style: "接地气".to_string(),
        },
    );
    let request = GenerationRequest::builder()
        .source_content("内容")
        .script_count(1)
        .platform("kuaishou")
        .build()
        .expect("valid request");

    let prompt = PromptBuilder::new(catalog).build(&request).expect("render");
    assert!(prompt.user.contains("平台特点：接地气"));
}

#[test]
fn test_completion_request_uses_default_settings() {
    let completion = PromptBuilder::default()
        .completion_request(&base_request("内容"), &ModelSettings::default())
        .expect("completion request");
    assert_eq!(completion.model(), "deepseek-chat");
    assert_eq!(*completion.max_tokens(), 4000);
    assert!(completion.user_prompt().contains("2个不同的主题"));
}
