//! Read-only interfaces to the external record stores.
//!
//! The back-office record stores (users, messages, todos, announcements)
//! live outside this system. The presence/push core consumes them only to
//! enrich event payloads and to resolve the authenticated identity, so the
//! interfaces here are narrow and read-only.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::UserId;

/// A user as the directory exposes it to the core.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UserSummary {
    /// Numeric user id.
    pub id: UserId,
    /// Login name (the token subject).
    pub username: String,
    /// Human display name, falls back to the username.
    pub display_name: String,
    /// Role codes currently assigned to the user.
    pub roles: Vec<String>,
}

impl UserSummary {
    /// Name shown to other users (display name when set, else username).
    pub fn shown_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

/// Read access to the external user store.
///
/// Credential verification belongs to the store: password hashing and
/// account-status policy are not this system's concern.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Look up a user by id, with current roles attached.
    async fn get_user(&self, id: UserId) -> AppResult<Option<UserSummary>>;

    /// Look up a user by username, with current roles attached.
    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<UserSummary>>;

    /// Verify a username/password pair. Returns the user on success,
    /// `None` on bad credentials or disabled account.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<UserSummary>>;
}

/// Read access to the internal-message store.
#[async_trait]
pub trait MessageRecords: Send + Sync + std::fmt::Debug + 'static {
    /// Number of unread private messages for a user.
    async fn count_unread(&self, user_id: UserId) -> AppResult<i64>;
}

/// Read access to the todo store.
#[async_trait]
pub trait TodoRecords: Send + Sync + std::fmt::Debug + 'static {
    /// Number of pending todos for a user.
    async fn count_pending(&self, user_id: UserId) -> AppResult<i64>;
}
