//! Auth handlers: login, logout, me.
//!
//! These paths sit on the gate's bypass list, so logout and me read the
//! bearer token themselves.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::{debug, info};

use opsdesk_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserInfo};
use crate::error::ApiError;
use crate::middleware::auth::bearer_token;
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let user = state
        .directory
        .verify_credentials(&req.username, &req.password)
        .await?
        .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

    let issued = state.authority.issue(user.id, &user.username, req.remember_me)?;
    state.presence.mark_online(user.id, user.shown_name()).await;
    info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(Json(ApiResponse::ok(LoginResponse {
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
        user: UserInfo::from(user),
    })))
}

/// POST /auth/logout
///
/// Idempotent: succeeds whether or not the presented token is still
/// valid, and with no token at all. A valid token is revoked and its
/// user marked offline.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        match state.authority.validate(token).await {
            Ok(claims) => {
                let user_id = claims.user_id();
                state.authority.revoke(token).await?;
                state.presence.mark_offline(user_id).await;
                state.hub.close(user_id);
                info!(%user_id, "User logged out");
            }
            Err(err) => {
                debug!(error = %err, "Logout with an unusable token");
                state.authority.revoke(token).await?;
            }
        }
    }

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out".to_string(),
    })))
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| AppError::authentication("Authentication required"))?;
    let claims = state.authority.validate(token).await?;

    let user = state
        .directory
        .get_user(claims.user_id())
        .await?
        .ok_or_else(|| AppError::authentication("Unknown user"))?;

    Ok(Json(ApiResponse::ok(UserInfo::from(user))))
}
