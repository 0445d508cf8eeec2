//! SSE subscription surface.

use http::StatusCode;

use crate::helpers::TestApp;
use opsdesk_core::types::UserId;

#[tokio::test]
async fn subscribe_opens_an_event_stream() {
    let app = TestApp::new().await;
    let token = app.login("alice", "alice123").await;

    let response = app
        .raw_request("GET", "/sse/subscribe", None, Some(&token))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/event-stream"));

    assert!(app.state.hub.is_connected(UserId::new(2)));
    assert_eq!(app.state.hub.connection_count(), 1);
}

#[tokio::test]
async fn subscribe_without_a_token_is_rejected() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/sse/subscribe", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn resubscribing_keeps_a_single_registration() {
    let app = TestApp::new().await;
    let token = app.login("alice", "alice123").await;

    let _first = app
        .raw_request("GET", "/sse/subscribe", None, Some(&token))
        .await;
    let _second = app
        .raw_request("GET", "/sse/subscribe", None, Some(&token))
        .await;

    assert_eq!(app.state.hub.connection_count(), 1);
}

#[tokio::test]
async fn unsubscribe_clears_the_registration_and_is_idempotent() {
    let app = TestApp::new().await;
    let token = app.login("alice", "alice123").await;

    let _stream = app
        .raw_request("GET", "/sse/subscribe", None, Some(&token))
        .await;
    assert!(app.state.hub.is_connected(UserId::new(2)));

    let first = app
        .request("DELETE", "/sse/unsubscribe", None, Some(&token))
        .await;
    let second = app
        .request("DELETE", "/sse/unsubscribe", None, Some(&token))
        .await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert!(!app.state.hub.is_connected(UserId::new(2)));
}

#[tokio::test]
async fn online_count_tracks_subscriptions() {
    let app = TestApp::new().await;
    let admin_token = app.login("admin", "admin123").await;
    let alice_token = app.login("alice", "alice123").await;

    let empty = app
        .request("GET", "/sse/online-count", None, Some(&admin_token))
        .await;
    assert_eq!(empty.body["data"]["count"], 0);

    let _admin_stream = app
        .raw_request("GET", "/sse/subscribe", None, Some(&admin_token))
        .await;
    let _alice_stream = app
        .raw_request("GET", "/sse/subscribe", None, Some(&alice_token))
        .await;

    let two = app
        .request("GET", "/sse/online-count", None, Some(&admin_token))
        .await;
    assert_eq!(two.status, StatusCode::OK);
    assert_eq!(two.body["data"]["count"], 2);
}
