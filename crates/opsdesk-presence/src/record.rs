//! The presence record stored per user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use opsdesk_core::types::UserId;

/// One user's presence, stored as a JSON document under `presence:<id>`
/// with the inactivity TTL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresenceRecord {
    /// The user this record belongs to.
    pub user_id: UserId,
    /// Display name captured at login, for the online listing.
    pub display_name: String,
    /// When the current session started.
    pub login_time: DateTime<Utc>,
    /// Last observed activity. Refreshed on every touch.
    pub last_active_time: DateTime<Utc>,
}

impl PresenceRecord {
    /// Create a fresh record for a user who just came online.
    pub fn new(user_id: UserId, display_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            display_name: display_name.into(),
            login_time: now,
            last_active_time: now,
        }
    }

    /// Refresh the activity timestamp, keeping the login time.
    pub fn touched(mut self) -> Self {
        self.last_active_time = Utc::now();
        self
    }
}
