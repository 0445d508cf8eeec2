//! Config-seeded record stores.
//!
//! The real user, message, and todo stores live outside this system. The
//! seeded implementations here back the development binary and the tests:
//! a fixed user directory from configuration, and in-memory counters for
//! unread messages and pending todos.

use async_trait::async_trait;
use dashmap::DashMap;

use opsdesk_core::config::DirectoryConfig;
use opsdesk_core::result::AppResult;
use opsdesk_core::traits::{MessageRecords, TodoRecords, UserDirectory, UserSummary};
use opsdesk_core::types::UserId;

/// User directory seeded from configuration.
#[derive(Debug)]
pub struct StaticDirectory {
    /// Seeded users, with the plain-text password kept alongside.
    users: Vec<SeededUser>,
}

#[derive(Debug, Clone)]
struct SeededUser {
    summary: UserSummary,
    password: String,
}

impl StaticDirectory {
    pub fn new(config: &DirectoryConfig) -> Self {
        let users = config
            .users
            .iter()
            .map(|seed| {
                let display_name = if seed.display_name.is_empty() {
                    seed.username.clone()
                } else {
                    seed.display_name.clone()
                };
                SeededUser {
                    summary: UserSummary {
                        id: UserId::new(seed.id),
                        username: seed.username.clone(),
                        display_name,
                        roles: seed.roles.clone(),
                    },
                    password: seed.password.clone(),
                }
            })
            .collect();
        Self { users }
    }
}

#[async_trait]
impl UserDirectory for StaticDirectory {
    async fn get_user(&self, id: UserId) -> AppResult<Option<UserSummary>> {
        Ok(self
            .users
            .iter()
            .find(|user| user.summary.id == id)
            .map(|user| user.summary.clone()))
    }

    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<UserSummary>> {
        Ok(self
            .users
            .iter()
            .find(|user| user.summary.username == username)
            .map(|user| user.summary.clone()))
    }

    async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<UserSummary>> {
        // Plain comparison against the seeded password; real credential
        // policy belongs to the external user store.
        Ok(self
            .users
            .iter()
            .find(|user| user.summary.username == username && user.password == password)
            .map(|user| user.summary.clone()))
    }
}

/// In-memory unread/pending counters.
///
/// Backs [`MessageRecords`] and [`TodoRecords`] for development and tests;
/// counters default to zero and can be set directly.
#[derive(Debug, Default)]
pub struct InMemoryRecords {
    unread: DashMap<UserId, i64>,
    pending: DashMap<UserId, i64>,
}

impl InMemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unread(&self, user_id: UserId, count: i64) {
        self.unread.insert(user_id, count);
    }

    pub fn set_pending(&self, user_id: UserId, count: i64) {
        self.pending.insert(user_id, count);
    }
}

#[async_trait]
impl MessageRecords for InMemoryRecords {
    async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        Ok(self.unread.get(&user_id).map(|count| *count).unwrap_or(0))
    }
}

#[async_trait]
impl TodoRecords for InMemoryRecords {
    async fn count_pending(&self, user_id: UserId) -> AppResult<i64> {
        Ok(self.pending.get(&user_id).map(|count| *count).unwrap_or(0))
    }
}
