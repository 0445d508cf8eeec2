//! Presence query handlers.

use axum::extract::State;
use axum::Json;

use crate::dto::response::{ApiResponse, OnlineUserResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /presence/online
///
/// The reconciled online listing: expired members never appear.
pub async fn list_online(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Json<ApiResponse<Vec<OnlineUserResponse>>> {
    let online = state
        .presence
        .list_online()
        .await
        .into_iter()
        .map(OnlineUserResponse::from)
        .collect();
    Json(ApiResponse::ok(online))
}
