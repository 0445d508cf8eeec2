//! The authentication gate.
//!
//! Runs on every request. Paths on the bypass list pass through untouched.
//! For everything else the gate validates the bearer token, resolves the
//! user, stores [`CurrentUser`] in the request extensions, and refreshes
//! presence activity. It enriches only: a missing or bad token leaves the
//! request unauthenticated and lets the handler decide, so public routes
//! stay public without being listed here.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use opsdesk_core::types::UserId;

use crate::extractors::CurrentUser;
use crate::state::AppState;

/// Pull the raw bearer token out of the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// Gate middleware, mounted over the whole router.
pub async fn authentication_gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    if is_bypassed(&state, path) {
        return next.run(request).await;
    }

    if let Some(user) = resolve_identity(&state, request.headers()).await {
        state.presence.touch(user.user_id).await;
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

fn is_bypassed(state: &AppState, path: &str) -> bool {
    state
        .config
        .auth
        .bypass_prefixes
        .iter()
        .any(|prefix| path.starts_with(prefix.as_str()))
}

/// Validate the token and resolve the full identity. Any failure along
/// the way means "unauthenticated", never an error response.
async fn resolve_identity(state: &AppState, headers: &HeaderMap) -> Option<CurrentUser> {
    let token = bearer_token(headers)?;

    let claims = match state.authority.validate(token).await {
        Ok(claims) => claims,
        Err(err) => {
            debug!(error = %err, "Bearer token rejected");
            return None;
        }
    };

    let user_id = UserId::new(claims.uid);
    match state.directory.get_user(user_id).await {
        Ok(Some(user)) => Some(CurrentUser {
            user_id: user.id,
            username: user.username,
            display_name: user.display_name,
            roles: user.roles,
        }),
        Ok(None) => {
            debug!(%user_id, "Token subject no longer exists in the directory");
            None
        }
        Err(err) => {
            debug!(%user_id, error = %err, "Directory lookup failed");
            None
        }
    }
}
