//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use opsdesk_api::state::AppState;
use opsdesk_auth::TokenAuthority;
use opsdesk_cache::memory::MemoryCacheProvider;
use opsdesk_cache::CacheManager;
use opsdesk_core::config::directory::SeedUser;
use opsdesk_core::config::{AppConfig, DirectoryConfig};
use opsdesk_core::traits::UserDirectory;
use opsdesk_presence::PresenceRegistry;
use opsdesk_push::PushHub;
use opsdesk_service::StaticDirectory;

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// The state behind the router, for direct assertions.
    pub state: AppState,
}

impl TestApp {
    /// Create a test application over an in-memory store, seeded with
    /// two users: admin/admin123 (id 1) and alice/alice123 (id 2).
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.secret = "integration-test-secret".to_string();
        config.directory = DirectoryConfig {
            users: vec![
                SeedUser {
                    id: 1,
                    username: "admin".to_string(),
                    display_name: "Administrator".to_string(),
                    password: "admin123".to_string(),
                    roles: vec!["admin".to_string()],
                },
                SeedUser {
                    id: 2,
                    username: "alice".to_string(),
                    display_name: "Alice Zhang".to_string(),
                    password: "alice123".to_string(),
                    roles: vec!["staff".to_string()],
                },
            ],
        };

        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&config.cache.memory),
        )));
        let authority = Arc::new(TokenAuthority::new(&config.auth, Arc::clone(&cache)));
        let presence = PresenceRegistry::new(&config.presence, Arc::clone(&cache));
        let hub = PushHub::new(&config.push);
        let directory: Arc<dyn UserDirectory> = Arc::new(StaticDirectory::new(&config.directory));

        let state = AppState {
            config: Arc::new(config),
            cache,
            authority,
            presence,
            hub,
            directory,
        };

        let router = opsdesk_api::build_router(state.clone());

        Self { router, state }
    }

    /// Login and return the bearer token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self.request("POST", "/auth/login", Some(body), None).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["data"]["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let response = self.raw_request(method, path, body, token).await;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Make a request and return the raw response without draining the
    /// body. Needed for the SSE endpoint, whose body never ends.
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> axum::response::Response {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request")
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}
