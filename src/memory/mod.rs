//! Conversation memory with periodic one-sentence summaries.
//!
//! [`ConversationMemory`] owns the ordered message log. Every time a user
//! message brings the turn count to a multiple of the summary period, the
//! memory asks its [`CompletionClient`] to condense the whole log into one
//! sentence and appends that sentence as a `Summary: ...` system message.
//! This happens inside [`ConversationMemory::append`] and is reported through
//! its return value.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{BuddyConfig, DEFAULT_SUMMARY_PERIOD, DEFAULT_TONE};
use crate::error::BuddyError;
use crate::provider::{CompletionClient, CompletionRequest};
use crate::types::{CompletionSettings, Message, Role};

/// Prefix of the system message recorded after each summarization cycle.
pub const SUMMARY_PREFIX: &str = "Summary: ";

/// Sampling temperature for summary requests.
pub const SUMMARY_TEMPERATURE: f64 = 0.0;

/// When and how the memory summarizes itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryPolicy {
    /// Summarize after every `period` user turns. Must be non-zero.
    pub period: u32,
    /// Persona/tone the summary must keep.
    pub tone: String,
    pub settings: CompletionSettings,
}

impl Default for SummaryPolicy {
    fn default() -> Self {
        Self {
            period: DEFAULT_SUMMARY_PERIOD,
            tone: DEFAULT_TONE.to_string(),
            settings: CompletionSettings::default(),
        }
    }
}

impl SummaryPolicy {
    /// Period, tone and model come from `config`. Summaries always decode at
    /// temperature 0 regardless of the reply temperature.
    pub fn from_config(config: &BuddyConfig) -> Self {
        Self {
            period: config.summary_period,
            tone: config.tone.clone(),
            settings: CompletionSettings::builder()
                .model(config.model.clone())
                .temperature(SUMMARY_TEMPERATURE)
                .build(),
        }
    }

    /// The synthetic system instruction appended to the log for a summary request.
    pub fn instruction(&self) -> String {
        format!(
            "Summarize the conversation above in one concise sentence while keeping {}.",
            self.tone
        )
    }
}

/// What an [`ConversationMemory::append`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The message was recorded; no summarization cycle ran.
    Appended,
    /// The message was recorded and a summarization cycle completed.
    Summarized { summary: String },
}

/// Ordered, append-only conversation log.
pub struct ConversationMemory {
    messages: Vec<Message>,
    turn_count: u64,
    running_summary: String,
    client: Arc<dyn CompletionClient>,
    policy: SummaryPolicy,
}

impl fmt::Debug for ConversationMemory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationMemory")
            .field("messages", &self.messages.len())
            .field("turn_count", &self.turn_count)
            .field("running_summary", &self.running_summary)
            .field("client", &self.client.model_id())
            .field("policy", &self.policy)
            .finish()
    }
}

impl ConversationMemory {
    /// Create a memory seeded with `seed` (typically the loaded prompt set).
    ///
    /// Seed messages never count as user turns.
    pub fn new(
        seed: Vec<Message>,
        client: Arc<dyn CompletionClient>,
        policy: SummaryPolicy,
    ) -> Result<Self, BuddyError> {
        if policy.period == 0 {
            return Err(BuddyError::Configuration(
                "summary period must be at least 1".into(),
            ));
        }
        Ok(Self {
            messages: seed,
            turn_count: 0,
            running_summary: String::new(),
            client,
            policy,
        })
    }

    /// Append a message.
    ///
    /// A `User` message increments the turn count. If the new count is a
    /// multiple of the summary period, a summarization cycle runs before this
    /// returns. If that cycle fails the user message stays recorded, no summary
    /// line is added, and the failure comes back as
    /// [`BuddyError::Summarization`].
    pub async fn append(
        &mut self,
        role: Role,
        content: impl Into<String>,
    ) -> Result<AppendOutcome, BuddyError> {
        self.messages.push(Message::new(role, content));

        if role != Role::User {
            return Ok(AppendOutcome::Appended);
        }

        self.turn_count += 1;
        if self.turn_count % u64::from(self.policy.period) != 0 {
            return Ok(AppendOutcome::Appended);
        }

        let summary = self.summarize().await?;
        Ok(AppendOutcome::Summarized { summary })
    }

    /// Like [`append`](Self::append), but takes the role as a string.
    ///
    /// Unknown roles are rejected before anything is recorded.
    pub async fn append_raw(
        &mut self,
        role: &str,
        content: impl Into<String>,
    ) -> Result<AppendOutcome, BuddyError> {
        let role = Role::parse(role)?;
        self.append(role, content).await
    }

    async fn summarize(&mut self) -> Result<String, BuddyError> {
        let mut prompt = self.messages.clone();
        prompt.push(Message::system(self.policy.instruction()));
        let request = CompletionRequest::new(prompt, self.policy.settings.clone());

        debug!(turn = self.turn_count, "running summarization cycle");

        let reply = self.client.complete(&request).await.map_err(|e| {
            warn!(turn = self.turn_count, error = %e, "summarization failed");
            BuddyError::Summarization(e)
        })?;

        self.running_summary = reply.trim().to_string();
        self.messages.push(Message::system(format!(
            "{SUMMARY_PREFIX}{}",
            self.running_summary
        )));
        info!(turn = self.turn_count, "summary recorded");

        Ok(self.running_summary.clone())
    }

    /// Latest summary, or an empty string before the first cycle.
    pub fn current_summary(&self) -> &str {
        &self.running_summary
    }

    /// The full log in insertion order.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    /// Number of user messages appended so far.
    pub fn turn_count(&self) -> u64 {
        self.turn_count
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
