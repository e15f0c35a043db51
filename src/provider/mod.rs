//! Completion client trait and implementations.

pub mod http;
pub mod openai;

pub use openai::OpenAiClient;

use async_trait::async_trait;

use crate::error::CompletionError;
use crate::types::{CompletionSettings, Message};

/// A request sent to a completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    pub settings: CompletionSettings,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>, settings: CompletionSettings) -> Self {
        Self { messages, settings }
    }
}

/// The boundary to a hosted language model.
///
/// Turns an ordered message sequence into one generated reply. Implementations
/// report every failure as a [`CompletionError`]; callers never retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Model the client talks to by default.
    fn model_id(&self) -> &str;

    /// Generate a single reply (non-streaming).
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
