// HttpCompletionClient against a mock service
//
// Covers the wire format of both endpoints and the mapping of every failure
// mode to CompletionError::NetworkFailure.

use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use ghostline::compose::{
    AcceptOutcome, CompletionSession, HostEditor, LatestOverlay, Overlay, SessionOptions,
    TextBuffer,
};
use ghostline::config::ServiceConfig;
use ghostline::errors::CompletionError;
use ghostline::service::{
    FeedbackEvent, FeedbackService, HttpCompletionClient, SuggestionRequest, SuggestionService,
    UserId,
};

fn client_for(server: &Server) -> HttpCompletionClient {
    let config = ServiceConfig {
        base_url: server.url(),
        timeout_secs: 5,
        ..ServiceConfig::default()
    };
    HttpCompletionClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_suggest_posts_current_text() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate-suggestion")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "current_text": "The weather is" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"suggestion": "is lovely today"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .suggest(&SuggestionRequest::new("The weather is"))
        .await
        .unwrap();

    assert_eq!(response.suggestion, "is lovely today");
    assert!(!response.cached);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_suggest_sends_user_id_when_personalized() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate-suggestion")
        .match_body(Matcher::Json(json!({
            "current_text": "Hi",
            "user_id": "user-7"
        })))
        .with_status(200)
        .with_body(r#"{"suggestion": "there", "cached": true}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let request = SuggestionRequest::new("Hi").with_user(UserId::new("user-7"));
    let response = client.suggest(&request).await.unwrap();

    assert_eq!(response.suggestion, "there");
    assert!(response.cached);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_network_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate-suggestion")
        .with_status(500)
        .with_body("model not loaded")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .suggest(&SuggestionRequest::new("hello"))
        .await
        .unwrap_err();

    match err {
        CompletionError::NetworkFailure(message) => {
            assert!(message.contains("500"), "message: {}", message);
            assert!(message.contains("model not loaded"), "message: {}", message);
        }
        other => panic!("expected NetworkFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_network_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate-suggestion")
        .with_status(200)
        .with_body(r#"{"text": "wrong field"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .suggest(&SuggestionRequest::new("hello"))
        .await
        .unwrap_err();

    assert!(matches!(err, CompletionError::NetworkFailure(_)));
}

#[tokio::test]
async fn test_unreachable_service_is_network_failure() {
    let config = ServiceConfig {
        // Port 9 (discard) is essentially never listening
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..ServiceConfig::default()
    };
    let client = HttpCompletionClient::new(&config).unwrap();

    let err = client
        .suggest(&SuggestionRequest::new("hello"))
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::NetworkFailure(_)));
}

#[tokio::test]
async fn test_feedback_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/feedback")
        .match_body(Matcher::Json(json!({
            "user_id": "user-1",
            "context": "I saw the quick",
            "selected_suggestion": "brown fox"
        })))
        .with_status(200)
        .with_body(r#"{"status": "success"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .record(&FeedbackEvent {
            user_id: UserId::new("user-1"),
            context: "I saw the quick".to_string(),
            selected_suggestion: "brown fox".to_string(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_health_reports_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(r#"{"message": "Server is running"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let status = client.health().await.unwrap();
    assert_eq!(status.message, "Server is running");
}

#[tokio::test]
async fn test_health_failure_is_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/health")
        .with_status(503)
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(client.health().await.is_err());
}

/// Type, wait for the ghost text, accept it, and check the feedback call
#[tokio::test]
async fn test_session_round_trip_over_http() {
    let mut server = Server::new_async().await;
    let suggest = server
        .mock("POST", "/api/generate-suggestion")
        .match_body(Matcher::Json(json!({ "current_text": "Thanks for" })))
        .with_status(200)
        .with_body(r#"{"suggestion": "for your help"}"#)
        .expect(1)
        .create_async()
        .await;
    let feedback = server
        .mock("POST", "/api/feedback")
        .match_body(Matcher::Json(json!({
            "user_id": "user-42",
            "context": "Thanks for",
            "selected_suggestion": "your help"
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let client = Arc::new(client_for(&server));
    let options = SessionOptions {
        debounce: Duration::from_millis(10),
        user_id: UserId::new("user-42"),
        personalize: false,
    };
    let mut session =
        CompletionSession::new(client.clone(), client, LatestOverlay::default(), options);
    let mut buffer = TextBuffer::new("Thanks for");

    session.on_text_changed(&buffer.snapshot());
    session.settle(&buffer.snapshot()).await;
    assert_eq!(
        session.renderer().overlay(),
        &Overlay::Ghost("your help".to_string())
    );

    let outcome = session.on_accept_key(&mut buffer);
    assert!(matches!(outcome, AcceptOutcome::Accepted { .. }));
    assert_eq!(buffer.text(), "Thanks foryour help");
    session.flush_feedback().await;

    suggest.assert_async().await;
    feedback.assert_async().await;
}
