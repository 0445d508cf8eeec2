//! The presence registry.
//!
//! Writes a TTL'd record per user and maintains the online membership set.
//! Presence is advisory: every mutation logs and swallows store failures so
//! a store outage never breaks login, logout, or request handling. Reads
//! fail closed (offline / empty).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use opsdesk_cache::keys::{presence_online_set, presence_record};
use opsdesk_cache::CacheManager;
use opsdesk_core::config::PresenceConfig;
use opsdesk_core::traits::CacheProvider;
use opsdesk_core::types::UserId;

use crate::record::PresenceRecord;

/// Tracks which users are online via TTL'd records in the shared store.
#[derive(Debug, Clone)]
pub struct PresenceRegistry {
    /// Shared store holding the records and the online set.
    cache: Arc<CacheManager>,
    /// Inactivity window. A record not refreshed within it expires.
    inactivity_ttl: Duration,
}

impl PresenceRegistry {
    pub fn new(config: &PresenceConfig, cache: Arc<CacheManager>) -> Self {
        Self {
            cache,
            inactivity_ttl: Duration::from_secs(config.inactivity_ttl_seconds),
        }
    }

    /// Mark a user online: write a fresh record and add them to the
    /// online set. Store failures are logged and swallowed.
    pub async fn mark_online(&self, user_id: UserId, display_name: &str) {
        let record = PresenceRecord::new(user_id, display_name);
        let key = presence_record(user_id);
        if let Err(err) = self
            .cache
            .set_json(&key, &record, self.inactivity_ttl)
            .await
        {
            warn!(%user_id, error = %err, "Failed to write presence record");
            return;
        }
        if let Err(err) = self
            .cache
            .set_add(&presence_online_set(), &user_id.to_string())
            .await
        {
            warn!(%user_id, error = %err, "Failed to add user to online set");
        }
    }

    /// Mark a user offline: drop the record and the set membership.
    pub async fn mark_offline(&self, user_id: UserId) {
        if let Err(err) = self.cache.delete(&presence_record(user_id)).await {
            warn!(%user_id, error = %err, "Failed to delete presence record");
        }
        if let Err(err) = self
            .cache
            .set_remove(&presence_online_set(), &user_id.to_string())
            .await
        {
            warn!(%user_id, error = %err, "Failed to remove user from online set");
        }
    }

    /// Refresh a user's activity, resetting the inactivity window.
    ///
    /// A no-op when the user has no live record: activity on an expired
    /// session does not resurrect presence, only a new login does.
    pub async fn touch(&self, user_id: UserId) {
        let key = presence_record(user_id);
        let record: Option<PresenceRecord> = match self.cache.get_json(&key).await {
            Ok(record) => record,
            Err(err) => {
                warn!(%user_id, error = %err, "Failed to read presence record");
                return;
            }
        };
        let Some(record) = record else { return };
        if let Err(err) = self
            .cache
            .set_json(&key, &record.touched(), self.inactivity_ttl)
            .await
        {
            warn!(%user_id, error = %err, "Failed to refresh presence record");
        }
    }

    /// Whether the user has a live presence record. Fails closed to
    /// `false` on store errors.
    pub async fn is_online(&self, user_id: UserId) -> bool {
        self.cache
            .exists(&presence_record(user_id))
            .await
            .unwrap_or_else(|err| {
                warn!(%user_id, error = %err, "Presence lookup failed, treating as offline");
                false
            })
    }

    /// Check several users in one pass.
    pub async fn batch_is_online(&self, user_ids: &[UserId]) -> HashMap<UserId, bool> {
        let mut result = HashMap::with_capacity(user_ids.len());
        for &user_id in user_ids {
            result.insert(user_id, self.is_online(user_id).await);
        }
        result
    }

    /// List the live presence records.
    ///
    /// Reads the online set and verifies each member against its record;
    /// members whose record expired are dropped from the result and pruned
    /// from the set in the background. Fails to an empty list on store
    /// errors.
    pub async fn list_online(&self) -> Vec<PresenceRecord> {
        let members = match self.cache.set_members(&presence_online_set()).await {
            Ok(members) => members,
            Err(err) => {
                warn!(error = %err, "Failed to read online set");
                return Vec::new();
            }
        };

        let mut records = Vec::with_capacity(members.len());
        let mut stale = Vec::new();
        for member in members {
            let Ok(user_id) = member.parse::<UserId>() else {
                stale.push(member);
                continue;
            };
            match self.cache.get_json::<PresenceRecord>(&presence_record(user_id)).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => stale.push(member),
                Err(err) => {
                    warn!(%user_id, error = %err, "Failed to read presence record");
                }
            }
        }

        if !stale.is_empty() {
            debug!(count = stale.len(), "Pruning stale online-set members");
            let cache = Arc::clone(&self.cache);
            tokio::spawn(async move {
                for member in stale {
                    if let Err(err) = cache.set_remove(&presence_online_set(), &member).await {
                        warn!(member, error = %err, "Failed to prune online-set member");
                    }
                }
            });
        }

        records.sort_by_key(|record| record.user_id);
        records
    }

    /// Number of users currently online, after reconciliation.
    pub async fn online_count(&self) -> usize {
        self.list_online().await.len()
    }
}
