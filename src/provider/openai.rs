//! OpenAI Chat Completions API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::BuddyConfig;
use crate::error::{BuddyError, CompletionError};
use crate::types::Message;
use crate::util::timeout::with_timeout;

use super::http::{bearer_headers, build_client, status_to_error};
use super::{CompletionClient, CompletionRequest};

/// Client for any endpoint speaking the `/chat/completions` wire format.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BuddyError> {
        let base_url: String = base_url.into();
        Ok(Self {
            http: build_client(timeout)?,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
            timeout,
        })
    }

    /// Build a client from startup configuration. Fails if no API key is set.
    pub fn from_config(config: &BuddyConfig) -> Result<Self, BuddyError> {
        Self::new(
            config.api_key()?,
            config.base_url.clone(),
            config.model.clone(),
            config.request_timeout,
        )
    }

    fn build_request_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        let model = if request.settings.model.is_empty() {
            self.model.as_str()
        } else {
            request.settings.model.as_str()
        };
        ChatRequest {
            model,
            messages: &request.messages,
            temperature: request.settings.temperature,
            max_tokens: request.settings.max_tokens,
        }
    }

    async fn send(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let body = self.build_request_body(request);
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            model = body.model,
            messages = request.messages.len(),
            "OpenAI complete"
        );

        let resp = self
            .http
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body_text = resp.text().await?;
        if !(200..300).contains(&status) {
            return Err(status_to_error(status, &body_text));
        }

        let data: ChatResponse = serde_json::from_str(&body_text)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;
        let choice = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::MalformedResponse("no choices in response".into()))?;
        let content = choice.message.content.ok_or_else(|| {
            CompletionError::MalformedResponse("choice has no message content".into())
        })?;

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        with_timeout(self.timeout, self.send(request)).await
    }
}

// OpenAI API wire types (internal)

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
