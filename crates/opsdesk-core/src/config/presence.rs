//! Presence registry configuration.

use serde::{Deserialize, Serialize};

/// Presence inactivity window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Inactivity TTL for presence records in seconds (30 minutes).
    /// A record that is not refreshed within this window expires and the
    /// user counts as offline.
    #[serde(default = "default_inactivity_ttl")]
    pub inactivity_ttl_seconds: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            inactivity_ttl_seconds: default_inactivity_ttl(),
        }
    }
}

fn default_inactivity_ttl() -> u64 {
    1800
}
