//! Token authority and authentication gate configuration.

use serde::{Deserialize, Serialize};

/// Token signing, lifetime, and gate bypass settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA512). Secrets shorter than
    /// the MAC key length are deterministically stretched, not rejected.
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Default token lifetime in seconds (2 hours).
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
    /// Extended ("remember me") token lifetime in seconds (7 days).
    #[serde(default = "default_extended_ttl")]
    pub extended_token_ttl_seconds: u64,
    /// Request path prefixes the authentication gate passes through
    /// without consulting the token authority.
    #[serde(default = "default_bypass_prefixes")]
    pub bypass_prefixes: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            token_ttl_seconds: default_token_ttl(),
            extended_token_ttl_seconds: default_extended_ttl(),
            bypass_prefixes: default_bypass_prefixes(),
        }
    }
}

fn default_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    7200
}

fn default_extended_ttl() -> u64 {
    604_800
}

fn default_bypass_prefixes() -> Vec<String> {
    [
        "/auth/",
        "/health",
        "/docs",
        "/static/",
        "/favicon.ico",
        "/error",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
