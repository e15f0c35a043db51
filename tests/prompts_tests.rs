//! Tests for prompt file loading.

use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use buddy::error::BuddyError;
use buddy::prompts::{load_prompts, parse_prompts};
use buddy::types::{Message, Role};

#[test]
fn one_example_pair_yields_three_messages_in_order() {
    let raw = r#"{
        "system": "Be helpful.",
        "examples": [{"user": "Hi", "assistant": "Hello!"}]
    }"#;

    let messages = parse_prompts(raw).unwrap();

    assert_eq!(
        messages,
        vec![
            Message::system("Be helpful."),
            Message::user("Hi"),
            Message::assistant("Hello!"),
        ]
    );
}

#[test]
fn examples_keep_file_order() {
    let raw = r#"{
        "system": "s",
        "examples": [
            {"user": "q1", "assistant": "a1"},
            {"user": "q2", "assistant": "a2"}
        ]
    }"#;

    let messages = parse_prompts(raw).unwrap();
    let flat: Vec<(Role, &str)> = messages.iter().map(|m| (m.role(), m.content())).collect();
    assert_eq!(
        flat,
        vec![
            (Role::System, "s"),
            (Role::User, "q1"),
            (Role::Assistant, "a1"),
            (Role::User, "q2"),
            (Role::Assistant, "a2"),
        ]
    );
}

#[test]
fn missing_examples_means_system_only() {
    let messages = parse_prompts(r#"{"system": "Only me."}"#).unwrap();
    assert_eq!(messages, vec![Message::system("Only me.")]);
}

#[test]
fn missing_system_is_a_validation_error() {
    let err = parse_prompts(r#"{"examples": []}"#).unwrap_err();
    assert!(matches!(err, BuddyError::Validation(_)));
}

#[test]
fn incomplete_example_pair_is_a_validation_error() {
    let err = parse_prompts(r#"{"system": "s", "examples": [{"user": "q"}]}"#).unwrap_err();
    assert!(matches!(err, BuddyError::Validation(_)));
}

#[test]
fn json_inside_markdown_fence_is_accepted() {
    let raw = "# Buddy-Tech prompts\n\nSome notes.\n\n```json\n{\"system\": \"Be brief.\", \"examples\": [{\"user\": \"a\", \"assistant\": \"b\"}]}\n```\n";

    let messages = parse_prompts(raw).unwrap();

    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], Message::system("Be brief."));
}

#[test]
fn plain_markdown_without_json_is_rejected() {
    let err = parse_prompts("# Just a heading\n\nNo prompts here.").unwrap_err();
    assert!(matches!(err, BuddyError::Validation(_)));
}

#[test]
fn load_prompts_reads_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"system": "From disk."}}"#).unwrap();

    let messages = load_prompts(file.path()).unwrap();

    assert_eq!(messages, vec![Message::system("From disk.")]);
}

#[test]
fn missing_file_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.md");

    let err = load_prompts(&path).unwrap_err();

    assert!(matches!(err, BuddyError::Configuration(ref m) if m.contains("nope.md")));
}
