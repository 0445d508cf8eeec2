//! Route definitions for the OpsDesk HTTP API.

use axum::middleware as axum_middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete router with the authentication gate mounted over
/// every route.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes())
        .merge(sse_routes())
        .merge(presence_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authentication_gate,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Login, logout, me. On the gate's bypass list.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Event stream subscription and introspection.
fn sse_routes() -> Router<AppState> {
    Router::new()
        .route("/sse/subscribe", get(handlers::sse::subscribe))
        .route("/sse/unsubscribe", delete(handlers::sse::unsubscribe))
        .route("/sse/online-count", get(handlers::sse::online_count))
}

/// Presence queries.
fn presence_routes() -> Router<AppState> {
    Router::new().route("/presence/online", get(handlers::presence::list_online))
}

/// Health. On the gate's bypass list.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
