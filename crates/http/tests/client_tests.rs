//! Integration tests for the auth backend client

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use vigil_core::{SessionError, SessionSource, SessionWatcher};
use vigil_http::{AuthClient, ClientError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_client_builder() {
    let client = AuthClient::builder()
        .base_url("http://localhost:3000/")
        .bearer_token("test-token")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:3000");
    assert_eq!(client.session_path(), "/api/auth/get-session");
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = AuthClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_client_builder_rejects_relative_session_path() {
    let result = AuthClient::builder()
        .base_url("http://localhost:3000")
        .session_path("api/session")
        .build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_get_session_returns_payload() {
    let mock_server = MockServer::start().await;

    let response_body = json!({
        "session": { "id": "sess_123", "userId": "user_1" },
        "user": { "id": "user_1", "email": "ada@example.com", "token": "tok_123" }
    });

    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
        .mount(&mock_server)
        .await;

    let client = AuthClient::new(mock_server.uri()).unwrap();

    let session = client.get_session().await.unwrap().unwrap();
    assert_eq!(session.token(), Some("tok_123"));
    assert_eq!(session.extra["session"]["id"], "sess_123");
}

#[tokio::test]
async fn test_get_session_null_means_signed_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&mock_server)
        .await;

    let client = AuthClient::new(mock_server.uri()).unwrap();
    assert_eq!(client.get_session().await.unwrap(), None);
}

#[tokio::test]
async fn test_credentials_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/session"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("cookie", "session_token=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": { "token": "t" } })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AuthClient::builder()
        .base_url(mock_server.uri())
        .session_path("/auth/session")
        .bearer_token("test-token")
        .cookie("session_token=abc")
        .build()
        .unwrap();

    let session = client.get_session().await.unwrap();
    assert!(session.is_some());
}

#[tokio::test]
async fn test_error_handling() {
    let mock_server = MockServer::start().await;

    // Test 401 Unauthorized
    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let client = AuthClient::new(mock_server.uri()).unwrap();

    let result = client.get_session().await;
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn test_invalid_body_is_a_serialization_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = AuthClient::new(mock_server.uri()).unwrap();

    let result = SessionSource::get_session(&client).await;
    assert!(matches!(result, Err(SessionError::Decode(_))));
}

#[tokio::test]
async fn test_watcher_mirrors_backend_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": { "token": "tok_w" } })))
        .mount(&mock_server)
        .await;

    let client = AuthClient::new(mock_server.uri()).unwrap();
    let watcher = SessionWatcher::builder(Arc::new(client))
        .interval(Duration::from_secs(60))
        .start()
        .await
        .unwrap();

    let snapshot = watcher.wait_until_ready().await;
    assert!(!snapshot.is_pending);
    assert_eq!(snapshot.token(), Some("tok_w"));
}

#[tokio::test]
async fn test_watcher_clears_session_when_backend_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/get-session"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = AuthClient::new(mock_server.uri()).unwrap();
    let watcher = SessionWatcher::builder(Arc::new(client))
        .start()
        .await
        .unwrap();

    let snapshot = watcher.wait_until_ready().await;
    assert!(!snapshot.is_pending);
    assert!(snapshot.data.is_none());
}
