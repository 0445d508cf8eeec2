//! Application state shared across handlers and middleware.

use std::sync::Arc;

use opsdesk_auth::TokenAuthority;
use opsdesk_cache::CacheManager;
use opsdesk_core::config::AppConfig;
use opsdesk_core::traits::UserDirectory;
use opsdesk_presence::PresenceRegistry;
use opsdesk_push::PushHub;

/// Shared dependencies, passed to every handler via `State<AppState>`.
/// All fields are cheap to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Shared store (Redis or in-memory).
    pub cache: Arc<CacheManager>,
    /// Token issue/validate/revoke.
    pub authority: Arc<TokenAuthority>,
    /// Who is online.
    pub presence: PresenceRegistry,
    /// Live push channels.
    pub hub: PushHub,
    /// External user store.
    pub directory: Arc<dyn UserDirectory>,
}
