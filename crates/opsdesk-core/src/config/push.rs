//! Push hub configuration.

use serde::{Deserialize, Serialize};

/// Push hub (server-sent events) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Idle timeout for an open push channel in seconds (30 minutes).
    /// A connection that lives past this is terminated and removed.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Outbound channel buffer size per connection. Sends never block;
    /// a full buffer means the client stopped draining, and the
    /// connection is closed as dead.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            idle_timeout_seconds: default_idle_timeout(),
            channel_buffer_size: default_channel_buffer(),
        }
    }
}

fn default_idle_timeout() -> u64 {
    1800
}

fn default_channel_buffer() -> usize {
    64
}
