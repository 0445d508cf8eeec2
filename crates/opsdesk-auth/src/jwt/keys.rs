//! Signing key derivation.
//!
//! HMAC-SHA512 wants a 64-byte key. A configured secret shorter than that
//! is deterministically stretched instead of rejected: the secret is
//! repeated until it reaches 64 bytes, digested with SHA-256, and the
//! 32-byte digest is doubled to 64 bytes. This tolerates weak legacy
//! configuration at startup; it is preserved compatibility behavior, not a
//! recommended key-management scheme.

use sha2::{Digest, Sha256};

/// Minimum key length for HMAC-SHA512.
const HS512_KEY_LEN: usize = 64;

/// Derive the signing key bytes from the configured secret.
pub fn derive_signing_key(secret: &str) -> Vec<u8> {
    let bytes = secret.as_bytes();
    if bytes.len() >= HS512_KEY_LEN {
        return bytes.to_vec();
    }

    let mut extended = String::from(secret);
    while extended.len() < HS512_KEY_LEN {
        extended.push_str(secret);
        if secret.is_empty() {
            break;
        }
    }

    let digest = Sha256::digest(extended.as_bytes());
    let mut key = Vec::with_capacity(HS512_KEY_LEN);
    key.extend_from_slice(&digest);
    key.extend_from_slice(&digest);
    key
}
