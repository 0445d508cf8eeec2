//! Key builders for every entry OpsDesk writes to the shared store.
//!
//! Centralising key construction prevents typos and makes it easy to find
//! every key the application uses. The provider applies the configured
//! deployment prefix on top of these.

use opsdesk_core::types::UserId;

// ── Presence keys ──────────────────────────────────────────

/// Presence record for one user. Value: JSON presence record,
/// TTL = inactivity window.
pub fn presence_record(user_id: UserId) -> String {
    format!("presence:{user_id}")
}

/// Set of user ids considered online. Not TTL'd per member; reconciled
/// on read against the individual presence records.
pub fn presence_online_set() -> String {
    "presence:online".to_string()
}

// ── Token revocation keys ──────────────────────────────────

/// Revocation entry for a raw token value. Value: revocation timestamp,
/// TTL = the token's remaining lifetime at revocation.
pub fn token_blacklist(raw_token: &str) -> String {
    format!("auth:blacklist:{raw_token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_keys_embed_user_id() {
        assert_eq!(presence_record(UserId::new(42)), "presence:42");
        assert_eq!(presence_online_set(), "presence:online");
    }

    #[test]
    fn blacklist_key_uses_raw_token() {
        assert_eq!(token_blacklist("abc.def.ghi"), "auth:blacklist:abc.def.ghi");
    }
}
