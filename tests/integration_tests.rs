use anyhow::Result;
use finmate::domain::model::Role;
use finmate::domain::ports::{ConversationStore, LanguageModel};
use finmate::{
    ChatService, ChatSession, FinmateError, FraudHeuristicDetector, GeminiClient, LocalStorage,
};
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        server.url("/v1beta"),
        "gemini-2.0-flash",
        "test-key",
        Duration::from_secs(5),
    )
    .unwrap()
}

fn reply_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}
        ]
    })
}

#[tokio::test]
async fn test_gemini_client_sends_prompt_and_key() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .header("x-goog-api-key", "test-key")
            .body_contains("\"text\":\"hello model\"");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(reply_body("hi there"));
    });

    let client = client_for(&server);
    let reply = client.generate("hello model").await.unwrap();

    api_mock.assert();
    assert_eq!(reply, "hi there");
}

#[tokio::test]
async fn test_gemini_error_message_is_surfaced() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(400).json_body(serde_json::json!({
            "error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}
        }));
    });

    let err = client_for(&server).generate("anything").await.unwrap_err();

    api_mock.assert();
    match err {
        FinmateError::ModelError { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid.");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_end_to_end_chat_with_fraud_alert() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let data_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .body_contains("User: Someone wants my routing number");
        then.status(200)
            .json_body(reply_body("Never share your routing number with strangers."));
    });

    let service = ChatService::new(client_for(&server), FraudHeuristicDetector::default());
    let mut session = ChatSession::open(service, LocalStorage::new(data_dir.clone())).await?;

    let reply = session.send("Someone wants my routing number").await?;

    api_mock.assert();
    assert!(reply.fraud_alert);
    assert_eq!(reply.reply, "Never share your routing number with strangers.");

    // Transcript is persisted with both turns.
    let saved = LocalStorage::new(data_dir).load().await?;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].title, "Someone wants my routing number");
    assert_eq!(saved[0].messages.len(), 2);
    assert_eq!(saved[0].messages[1].role, Role::Assistant);
    Ok(())
}

#[tokio::test]
async fn test_follow_up_includes_previous_conversation() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let mut first_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .body_contains("User: What is an ETF?");
        then.status(200).json_body(reply_body("A fund that trades like a stock."));
    });

    let service = ChatService::new(client_for(&server), FraudHeuristicDetector::default());
    let mut session = ChatSession::open(service, LocalStorage::new(data_dir))
        .await
        .unwrap();
    session.send("What is an ETF?").await.unwrap();
    first_mock.assert();
    // The follow-up prompt repeats the first question, so retire this mock.
    first_mock.delete();

    let follow_up_mock = server.mock(|when, then| {
        when.method(POST)
            .path(GENERATE_PATH)
            .body_contains("Previous conversation:")
            .body_contains("Assistant: A fund that trades like a stock.")
            .body_contains("User: Are they risky?");
        then.status(200).json_body(reply_body("All investments carry risk."));
    });

    let reply = session.send("Are they risky?").await.unwrap();
    follow_up_mock.assert();
    assert!(!reply.fraud_alert);
    assert_eq!(session.book().current().unwrap().messages.len(), 4);
}

#[tokio::test]
async fn test_failed_exchange_rolls_back_user_turn() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path(GENERATE_PATH);
        then.status(500);
    });

    let service = ChatService::new(client_for(&server), FraudHeuristicDetector::default());
    let mut session = ChatSession::open(service, LocalStorage::new(data_dir.clone()))
        .await
        .unwrap();

    let err = session.send("How big should my emergency fund be?").await.unwrap_err();

    api_mock.assert();
    assert!(matches!(err, FinmateError::ModelError { status: 500, .. }));
    assert!(!session.service().is_busy());

    let saved = LocalStorage::new(data_dir).load().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].messages.is_empty());
}
