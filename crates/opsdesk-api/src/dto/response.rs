//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use opsdesk_core::traits::UserSummary;
use opsdesk_presence::PresenceRecord;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The signed bearer token.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Token lifetime in seconds.
    pub expires_in: u64,
    /// The authenticated user.
    pub user: UserInfo,
}

/// User identity for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    /// Numeric user id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Display name.
    pub display_name: String,
    /// Role codes.
    pub roles: Vec<String>,
}

impl From<UserSummary> for UserInfo {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id.as_i64(),
            username: user.username,
            display_name: user.display_name,
            roles: user.roles,
        }
    }
}

/// One online user in the presence listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineUserResponse {
    /// Numeric user id.
    pub user_id: i64,
    /// Display name captured at login.
    pub display_name: String,
    /// Session start.
    pub login_time: DateTime<Utc>,
    /// Last observed activity.
    pub last_active_time: DateTime<Utc>,
}

impl From<PresenceRecord> for OnlineUserResponse {
    fn from(record: PresenceRecord) -> Self {
        Self {
            user_id: record.user_id.as_i64(),
            display_name: record.display_name,
            login_time: record.login_time,
            last_active_time: record.last_active_time,
        }
    }
}

/// Per-process push connection count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnlineCountResponse {
    /// Number of registered push channels in this process.
    pub count: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Shared store reachability.
    pub cache: String,
}
