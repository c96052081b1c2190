use socialcast_core::prompt::resolve_prompt;
use tempfile::tempdir;

#[test]
fn default_prompt_embeds_platform_name_and_full_content() {
    let prompts = tempdir().unwrap();
    let content = "A long blog post about orchard keeping.\nWith several lines.";

    let prompt = resolve_prompt(prompts.path(), "Telegram", content)
        .expect("Prompt resolution should succeed");

    assert!(
        prompt.contains("Telegram"),
        "Default prompt must name the platform: {prompt}"
    );
    assert!(
        prompt.contains(content),
        "Default prompt must embed the full supplied content"
    );
}

#[test]
fn template_file_takes_precedence_and_substitutes_content() {
    let prompts = tempdir().unwrap();
    std::fs::write(
        prompts.path().join("X.txt"),
        "Write one punchy post, max 280 chars, about:\n{content}\nNo hashtags.",
    )
    .unwrap();

    let prompt = resolve_prompt(prompts.path(), "X", "the launch announcement").unwrap();

    assert!(prompt.starts_with("Write one punchy post"));
    assert!(prompt.contains("the launch announcement"));
    assert!(
        !prompt.contains("{content}"),
        "Placeholder must be substituted: {prompt}"
    );
}

#[test]
fn template_without_placeholder_is_used_verbatim() {
    let prompts = tempdir().unwrap();
    let template = "A fixed prompt that ignores the page entirely.";
    std::fs::write(prompts.path().join("X.txt"), template).unwrap();

    let prompt = resolve_prompt(prompts.path(), "X", "ignored body").unwrap();

    assert_eq!(
        prompt, template,
        "A missing placeholder is not an error; the template is used as-is"
    );
    assert!(!prompt.contains("ignored body"));
}
