//! Command-line arguments for the `buddy` binary.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::BuddyConfig;
use crate::error::BuddyError;

/// Exit status for a failed run: 2 when the setup was wrong, 1 otherwise.
pub fn exit_code(err: &BuddyError) -> i32 {
    match err {
        BuddyError::Configuration(_) | BuddyError::Validation(_) => 2,
        BuddyError::Completion(_) | BuddyError::Summarization(_) | BuddyError::Io(_) => 1,
    }
}

/// One reply line as printed to stdout.
pub fn format_reply(bot_name: &str, reply: &str) -> String {
    format!("{bot_name}: {reply}")
}

/// Buddy-Tech: chat with a hosted model for a fixed number of turns.
#[derive(Parser, Debug)]
#[command(name = "buddy", version, about = "Buddy-Tech conversational CLI")]
pub struct Cli {
    /// Prompt file with the system instruction and few-shot examples
    #[arg(short, long)]
    pub prompts: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of user turns before exiting
    #[arg(short, long)]
    pub turns: Option<u32>,

    /// Model identifier (e.g. gpt-3.5-turbo)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Name printed before each reply
    #[arg(long)]
    pub bot_name: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply flag overrides on top of file and environment configuration.
    pub fn apply_to(&self, config: &mut BuddyConfig) {
        if let Some(ref path) = self.prompts {
            config.prompt_path = path.clone();
        }
        if let Some(turns) = self.turns {
            config.turn_limit = turns;
        }
        if let Some(ref model) = self.model {
            config.model = model.clone();
        }
        if let Some(ref name) = self.bot_name {
            config.bot_name = name.clone();
        }
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
