//! Prompt file loading.
//!
//! A prompt file is a JSON object with a `system` instruction and optional
//! few-shot `examples`:
//!
//! ```json
//! {
//!   "system": "You are Buddy-Tech.",
//!   "examples": [{ "user": "Hi", "assistant": "Hello! How can I help?" }]
//! }
//! ```
//!
//! The file is usually named `prompts.md`, so the JSON may also sit inside
//! the first fenced code block of a Markdown document.

use std::path::Path;

use serde::Deserialize;

use crate::error::BuddyError;
use crate::types::Message;

#[derive(Debug, Deserialize)]
struct PromptFile {
    system: String,
    #[serde(default)]
    examples: Vec<ExamplePair>,
}

#[derive(Debug, Deserialize)]
struct ExamplePair {
    user: String,
    assistant: String,
}

/// Read and parse a prompt file into the seed message sequence.
pub fn load_prompts(path: &Path) -> Result<Vec<Message>, BuddyError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        BuddyError::Configuration(format!("failed to read prompt file {}: {e}", path.display()))
    })?;
    parse_prompts(&raw)
}

/// Parse prompt file contents: one system message, then a user/assistant
/// pair per example, in file order.
pub fn parse_prompts(raw: &str) -> Result<Vec<Message>, BuddyError> {
    let file = parse_prompt_file(raw)?;

    let mut messages = Vec::with_capacity(1 + file.examples.len() * 2);
    messages.push(Message::system(file.system));
    for pair in file.examples {
        messages.push(Message::user(pair.user));
        messages.push(Message::assistant(pair.assistant));
    }
    Ok(messages)
}

fn parse_prompt_file(raw: &str) -> Result<PromptFile, BuddyError> {
    match serde_json::from_str::<PromptFile>(raw) {
        Ok(file) => Ok(file),
        Err(direct) => match fenced_block(raw) {
            Some(block) => serde_json::from_str(block)
                .map_err(|e| BuddyError::Validation(format!("malformed prompt file: {e}"))),
            None => Err(BuddyError::Validation(format!(
                "malformed prompt file: {direct}"
            ))),
        },
    }
}

/// Body of the first ``` fenced block, ignoring any info string.
fn fenced_block(raw: &str) -> Option<&str> {
    let start = raw.find("```")?;
    let after_fence = &raw[start + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(&body[..end])
}
