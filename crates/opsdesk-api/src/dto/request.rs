//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain password, verified by the user store.
    pub password: String,
    /// Ask for the extended token lifetime.
    #[serde(default)]
    pub remember_me: bool,
}
