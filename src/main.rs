//! Buddy CLI binary entry point.

use std::io::Write;
use std::sync::Arc;

use buddy::cli::{exit_code, format_reply, Cli};
use buddy::config::BuddyConfig;
use buddy::error::BuddyError;
use buddy::memory::{ConversationMemory, SummaryPolicy};
use buddy::prompts::load_prompts;
use buddy::provider::{CompletionClient, OpenAiClient};
use buddy::session::ChatSession;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        if let Some(hint) = e.recovery_suggestion().hint() {
            eprintln!("hint: {hint}");
        }
        std::process::exit(exit_code(&e));
    }
}

async fn run(cli: Cli) -> Result<(), BuddyError> {
    let mut config = BuddyConfig::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");

    let seed = load_prompts(&config.prompt_path)?;
    let client: Arc<dyn CompletionClient> = Arc::new(OpenAiClient::from_config(&config)?);
    let memory =
        ConversationMemory::new(seed, client.clone(), SummaryPolicy::from_config(&config))?;
    let mut session = ChatSession::new(memory, client, config.completion_settings());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    for _ in 0..config.turn_limit {
        print!("You: ");
        stdout.flush()?;

        let Some(input) = lines.next_line().await? else {
            println!();
            break;
        };

        let turn = session.respond(input).await?;
        if let Some(err) = turn.summary_error {
            eprintln!("(summary skipped: {err})");
        }
        println!("{}", format_reply(&config.bot_name, &turn.reply));
    }

    println!("\nFinal summary:\n{}", session.memory().current_summary());
    Ok(())
}
