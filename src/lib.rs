//! Buddy — a small conversational CLI agent.
//!
//! Relays user turns to a hosted chat-completion service, keeps the message
//! history in a [`memory::ConversationMemory`], and every few user turns asks
//! the model for a one-sentence running summary of the conversation.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use buddy::config::BuddyConfig;
//! use buddy::memory::{ConversationMemory, SummaryPolicy};
//! use buddy::provider::{CompletionClient, OpenAiClient};
//! use buddy::session::ChatSession;
//! use buddy::types::Message;
//!
//! # async fn example() -> buddy::error::Result<()> {
//! let config = BuddyConfig::load(None)?;
//! let client: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::from_config(&config)?);
//! let seed = vec![Message::system("You are a helpful shop assistant.")];
//! let memory = ConversationMemory::new(seed, client.clone(), SummaryPolicy::from_config(&config))?;
//! let mut session = ChatSession::new(memory, client, config.completion_settings());
//!
//! let turn = session.respond("Do you sell headphones?").await?;
//! println!("{}", turn.reply);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod memory;
pub mod prompts;
pub mod provider;
pub mod session;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
