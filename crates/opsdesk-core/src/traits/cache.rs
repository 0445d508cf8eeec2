//! Cache provider trait for pluggable shared-store backends.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for shared key-value store backends (Redis, or in-memory for
/// development and tests).
///
/// All values are serialized as strings (JSON). The provider is responsible
/// for key prefixing and TTL enforcement. Set operations back the presence
/// online-set; set members are never TTL'd individually.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key from the store.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a key exists (and has not expired).
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Add a member to the set stored at `key`.
    async fn set_add(&self, key: &str, member: &str) -> AppResult<()>;

    /// Remove a member from the set stored at `key`.
    async fn set_remove(&self, key: &str, member: &str) -> AppResult<()>;

    /// Return all members of the set stored at `key`.
    async fn set_members(&self, key: &str) -> AppResult<HashSet<String>>;

    /// Check that the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> AppResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key).await? {
            Some(value) => {
                let parsed = serde_json::from_str(&value)?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value by serializing to JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>
    where
        Self: Sized,
    {
        let json = serde_json::to_string(value)?;
        self.set(key, &json, ttl).await
    }
}
