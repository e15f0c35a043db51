//! Tests for the per-turn chat driver.

mod common;

use std::sync::Arc;

use common::MockClient;
use pretty_assertions::assert_eq;

use buddy::error::{BuddyError, CompletionError};
use buddy::memory::{ConversationMemory, SummaryPolicy};
use buddy::session::ChatSession;
use buddy::types::{CompletionSettings, Message, Role};

fn session_with(client: &Arc<MockClient>) -> ChatSession {
    let memory = ConversationMemory::new(
        vec![Message::system("You are Buddy-Tech.")],
        client.clone(),
        SummaryPolicy::default(),
    )
    .unwrap();
    ChatSession::new(memory, client.clone(), CompletionSettings::default())
}

#[tokio::test]
async fn respond_records_user_and_assistant_messages() {
    let client = Arc::new(MockClient::new());
    client.queue_response("  Hello there!  ");
    let mut session = session_with(&client);

    let turn = session.respond("hi").await.unwrap();

    assert_eq!(turn.reply, "Hello there!");
    assert!(turn.summary.is_none());
    assert_eq!(
        session.memory().history(),
        &[
            Message::system("You are Buddy-Tech."),
            Message::user("hi"),
            Message::assistant("Hello there!"),
        ]
    );

    let request = &client.requests()[0];
    assert_eq!(
        request.messages,
        vec![Message::system("You are Buddy-Tech."), Message::user("hi")]
    );
}

#[tokio::test]
async fn third_turn_summarizes_before_the_reply() {
    let client = Arc::new(MockClient::new());
    client.queue_response("r1");
    client.queue_response("r2");
    client.queue_response("They chatted about the weather.");
    client.queue_response("r3");
    let mut session = session_with(&client);

    session.respond("u1").await.unwrap();
    session.respond("u2").await.unwrap();
    let turn = session.respond("u3").await.unwrap();

    assert_eq!(turn.reply, "r3");
    assert_eq!(
        turn.summary.as_deref(),
        Some("They chatted about the weather.")
    );

    let roles: Vec<Role> = session.memory().history().iter().map(|m| m.role()).collect();
    assert_eq!(
        roles,
        vec![
            Role::System,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::System,
            Role::Assistant,
        ]
    );

    // The summary request never saw the third reply; the reply request saw the summary.
    let requests = client.requests();
    let summary_request = &requests[2];
    assert!(summary_request.messages.iter().all(|m| m.content() != "r3"));
    let reply_request = &requests[3];
    assert_eq!(
        reply_request.messages.last().unwrap(),
        &Message::system("Summary: They chatted about the weather.")
    );
}

#[tokio::test]
async fn failed_summary_is_reported_but_turn_completes() {
    let client = Arc::new(MockClient::new());
    client.queue_response("r1");
    client.queue_response("r2");
    client.queue_error(CompletionError::RateLimited {
        retry_after_ms: None,
    });
    client.queue_response("r3");
    let mut session = session_with(&client);

    session.respond("u1").await.unwrap();
    session.respond("u2").await.unwrap();
    let turn = session.respond("u3").await.unwrap();

    assert_eq!(turn.reply, "r3");
    assert!(turn.summary.is_none());
    assert!(matches!(
        turn.summary_error,
        Some(CompletionError::RateLimited { .. })
    ));
    assert_eq!(session.memory().current_summary(), "");
    assert!(session
        .memory()
        .history()
        .iter()
        .all(|m| !m.content().starts_with("Summary: ")));
}

#[tokio::test]
async fn failed_reply_propagates_and_keeps_user_message() {
    let client = Arc::new(MockClient::new());
    client.queue_error(CompletionError::Authentication("bad key".into()));
    let mut session = session_with(&client);

    let err = session.respond("hello?").await.unwrap_err();

    assert!(matches!(
        err,
        BuddyError::Completion(CompletionError::Authentication(_))
    ));
    let memory = session.into_memory();
    assert_eq!(memory.turn_count(), 1);
    assert_eq!(memory.history().last().unwrap(), &Message::user("hello?"));
}

#[tokio::test]
async fn five_turn_conversation_summarizes_once() {
    let client = Arc::new(MockClient::new());
    let mut session = session_with(&client);

    for n in 1..=5 {
        session.respond(format!("u{n}")).await.unwrap();
    }

    assert_eq!(client.summary_requests().len(), 1);
    assert_eq!(client.call_count(), 6);
    assert_eq!(session.memory().current_summary(), "Mock response");
}
