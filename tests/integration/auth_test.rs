//! Login, logout, and identity flow.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn login_returns_a_bearer_token_and_the_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "alice123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert!(data["token"].as_str().is_some());
    assert_eq!(data["token_type"], "Bearer");
    assert_eq!(data["expires_in"], 7200);
    assert_eq!(data["user"]["id"], 2);
    assert_eq!(data["user"]["username"], "alice");
}

#[tokio::test]
async fn remember_me_requests_the_extended_lifetime() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "alice123",
                "remember_me": true,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["expires_in"], 604800);
}

#[tokio::test]
async fn login_with_a_wrong_password_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "wrong",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn login_with_an_unknown_user_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "whatever",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_the_authenticated_identity() {
    let app = TestApp::new().await;
    let token = app.login("admin", "admin123").await;

    let response = app.request("GET", "/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "admin");
    assert_eq!(response.body["data"]["display_name"], "Administrator");
}

#[tokio::test]
async fn me_without_a_token_is_rejected() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_revokes_the_token() {
    let app = TestApp::new().await;
    let token = app.login("alice", "alice123").await;

    let before = app.request("GET", "/auth/me", None, Some(&token)).await;
    assert_eq!(before.status, StatusCode::OK);

    let logout = app.request("POST", "/auth/logout", None, Some(&token)).await;
    assert_eq!(logout.status, StatusCode::OK);

    let after = app.request("GET", "/auth/me", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_is_idempotent() {
    let app = TestApp::new().await;
    let token = app.login("alice", "alice123").await;

    let first = app.request("POST", "/auth/logout", None, Some(&token)).await;
    let second = app.request("POST", "/auth/logout", None, Some(&token)).await;
    let bare = app.request("POST", "/auth/logout", None, None).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(bare.status, StatusCode::OK);
}
