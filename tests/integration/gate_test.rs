//! Authentication gate behavior: bypass, enrichment, downstream 401s.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn health_is_reachable_without_a_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["cache"], "connected");
}

#[tokio::test]
async fn bypassed_paths_ignore_a_garbage_token() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/health", None, Some("not-a-real-token"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn guarded_routes_reject_the_unauthenticated() {
    let app = TestApp::new().await;

    for path in ["/presence/online", "/sse/online-count"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "path: {path}");
        assert_eq!(response.body["error"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn a_garbage_token_is_the_same_as_no_token() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/presence/online", None, Some("garbage.token.value"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn a_revoked_token_is_rejected_at_the_gate() {
    let app = TestApp::new().await;
    let token = app.login("admin", "admin123").await;

    let before = app
        .request("GET", "/sse/online-count", None, Some(&token))
        .await;
    assert_eq!(before.status, StatusCode::OK);

    app.request("POST", "/auth/logout", None, Some(&token)).await;

    let after = app
        .request("GET", "/sse/online-count", None, Some(&token))
        .await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}
