//! Presence over the HTTP surface.

use http::StatusCode;

use crate::helpers::TestApp;
use opsdesk_core::types::UserId;

#[tokio::test]
async fn login_puts_the_user_in_the_online_listing() {
    let app = TestApp::new().await;
    let admin_token = app.login("admin", "admin123").await;
    app.login("alice", "alice123").await;

    let response = app
        .request("GET", "/presence/online", None, Some(&admin_token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let online = response.body["data"].as_array().expect("array");
    assert_eq!(online.len(), 2);
    assert_eq!(online[0]["user_id"], 1);
    assert_eq!(online[1]["user_id"], 2);
    assert_eq!(online[1]["display_name"], "Alice Zhang");
}

#[tokio::test]
async fn logout_takes_the_user_out_of_the_listing() {
    let app = TestApp::new().await;
    let admin_token = app.login("admin", "admin123").await;
    let alice_token = app.login("alice", "alice123").await;

    app.request("POST", "/auth/logout", None, Some(&alice_token))
        .await;

    let response = app
        .request("GET", "/presence/online", None, Some(&admin_token))
        .await;
    let online = response.body["data"].as_array().expect("array");
    assert_eq!(online.len(), 1);
    assert_eq!(online[0]["user_id"], 1);

    assert!(!app.state.presence.is_online(UserId::new(2)).await);
}

#[tokio::test]
async fn an_authenticated_request_refreshes_activity() {
    let app = TestApp::new().await;
    let token = app.login("admin", "admin123").await;

    let first = app
        .request("GET", "/presence/online", None, Some(&token))
        .await;
    let before = parse_time(&first.body["data"][0]["last_active_time"]);

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let second = app
        .request("GET", "/presence/online", None, Some(&token))
        .await;
    let after = parse_time(&second.body["data"][0]["last_active_time"]);

    assert!(after > before, "activity not refreshed: {before} -> {after}");
}

fn parse_time(value: &serde_json::Value) -> chrono::DateTime<chrono::Utc> {
    value
        .as_str()
        .expect("timestamp")
        .parse()
        .expect("valid timestamp")
}
