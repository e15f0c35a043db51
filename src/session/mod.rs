//! Per-turn chat driver.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{BuddyError, CompletionError};
use crate::memory::{AppendOutcome, ConversationMemory};
use crate::provider::{CompletionClient, CompletionRequest};
use crate::types::{CompletionSettings, Role};

/// Result of one user turn.
#[derive(Debug)]
pub struct TurnReply {
    /// Assistant reply, trimmed.
    pub reply: String,
    /// Summary recorded during this turn, if a cycle ran and succeeded.
    pub summary: Option<String>,
    /// Failure of this turn's summarization cycle. The turn still completed.
    pub summary_error: Option<CompletionError>,
}

/// Relays user input to the completion client through a [`ConversationMemory`].
pub struct ChatSession {
    memory: ConversationMemory,
    client: Arc<dyn CompletionClient>,
    settings: CompletionSettings,
}

impl ChatSession {
    pub fn new(
        memory: ConversationMemory,
        client: Arc<dyn CompletionClient>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            memory,
            client,
            settings,
        }
    }

    /// Run one turn: record the input, ask for a reply, record the reply.
    ///
    /// The summary for a period-completing turn is produced before that
    /// turn's reply exists, so it never covers the reply. A failed summary
    /// is reported in [`TurnReply::summary_error`]; a failed reply aborts the
    /// turn with [`BuddyError::Completion`] and leaves the user message in
    /// the log.
    pub async fn respond(&mut self, input: impl Into<String>) -> Result<TurnReply, BuddyError> {
        let (summary, summary_error) = match self.memory.append(Role::User, input).await {
            Ok(AppendOutcome::Summarized { summary }) => (Some(summary), None),
            Ok(AppendOutcome::Appended) => (None, None),
            Err(BuddyError::Summarization(e)) => {
                warn!(error = %e, "continuing with stale summary");
                (None, Some(e))
            }
            Err(e) => return Err(e),
        };

        let request =
            CompletionRequest::new(self.memory.history().to_vec(), self.settings.clone());
        debug!(turn = self.memory.turn_count(), "requesting reply");
        let reply = self
            .client
            .complete(&request)
            .await
            .map_err(BuddyError::Completion)?
            .trim()
            .to_string();

        self.memory.append(Role::Assistant, reply.clone()).await?;

        Ok(TurnReply {
            reply,
            summary,
            summary_error,
        })
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn into_memory(self) -> ConversationMemory {
        self.memory
    }
}
