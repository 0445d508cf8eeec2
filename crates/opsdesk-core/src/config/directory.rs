//! Seeded user directory configuration.
//!
//! The real user/role stores are external; this section feeds the
//! config-seeded directory used for development wiring and tests.

use serde::{Deserialize, Serialize};

/// Seeded directory section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Users available to the seeded directory.
    #[serde(default)]
    pub users: Vec<SeedUser>,
}

/// One seeded user entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    /// Numeric user id.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Display name; defaults to the username.
    #[serde(default)]
    pub display_name: String,
    /// Plain-text password. The external user store owns real credential
    /// hashing; this seed exists only for development and tests.
    pub password: String,
    /// Role codes.
    #[serde(default)]
    pub roles: Vec<String>,
}
