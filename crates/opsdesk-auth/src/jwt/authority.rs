//! The token authority: issue, validate, revoke.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use opsdesk_cache::keys::token_blacklist;
use opsdesk_cache::CacheManager;
use opsdesk_core::config::AuthConfig;
use opsdesk_core::error::AppError;
use opsdesk_core::result::AppResult;
use opsdesk_core::traits::CacheProvider;
use opsdesk_core::types::UserId;

use super::claims::Claims;
use super::keys::derive_signing_key;

/// Floor for blacklist entry TTLs, so a token revoked at the edge of its
/// lifetime cannot race its own revocation entry under clock skew.
const MIN_BLACKLIST_TTL_SECS: u64 = 60;

/// A freshly issued session token.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct IssuedToken {
    /// The signed token value.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds, for the login response body.
    pub expires_in: u64,
}

/// Issues, validates, and revokes session tokens.
///
/// Issuance is pure computation; validation consults the revocation list
/// in the shared store; revocation writes to it. Presence is never
/// consulted here.
#[derive(Clone)]
pub struct TokenAuthority {
    /// HMAC key for signing.
    encoding_key: EncodingKey,
    /// HMAC key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration (algorithm, expiry, leeway).
    validation: Validation,
    /// Default token lifetime in seconds.
    token_ttl_seconds: u64,
    /// Extended ("remember me") lifetime in seconds.
    extended_ttl_seconds: u64,
    /// Shared store holding the revocation list.
    cache: Arc<CacheManager>,
}

impl std::fmt::Debug for TokenAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuthority")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("extended_ttl_seconds", &self.extended_ttl_seconds)
            .finish()
    }
}

impl TokenAuthority {
    /// Creates a new authority from auth configuration.
    pub fn new(config: &AuthConfig, cache: Arc<CacheManager>) -> Self {
        let key = derive_signing_key(&config.secret);

        let mut validation = Validation::new(Algorithm::HS512);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds, for clock skew
        validation.required_spec_claims.insert("exp".to_string());

        Self {
            encoding_key: EncodingKey::from_secret(&key),
            decoding_key: DecodingKey::from_secret(&key),
            validation,
            token_ttl_seconds: config.token_ttl_seconds,
            extended_ttl_seconds: config.extended_token_ttl_seconds,
            cache,
        }
    }

    /// Issues a signed token for the given identity.
    ///
    /// `extended` selects the "remember me" lifetime. No side effects
    /// beyond computation.
    pub fn issue(&self, user_id: UserId, subject: &str, extended: bool) -> AppResult<IssuedToken> {
        let ttl = if extended {
            self.extended_ttl_seconds
        } else {
            self.token_ttl_seconds
        };

        let now = Utc::now();
        let expires_at = now + chrono::Duration::seconds(ttl as i64);

        let claims = Claims {
            sub: subject.to_string(),
            uid: user_id.as_i64(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS512), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))?;

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in: ttl,
        })
    }

    /// Decodes and validates a token.
    ///
    /// Fails when the signature does not verify, the token is malformed or
    /// expired, or the raw value is present in the revocation store.
    pub async fn validate(&self, token: &str) -> AppResult<Claims> {
        let claims = self.decode(token)?;

        if self.is_revoked(token).await {
            return Err(AppError::authentication("Token has been revoked"));
        }

        Ok(claims)
    }

    /// Revokes a token by blacklisting its raw value for the remainder of
    /// its lifetime. Idempotent: an already-invalid token is silently
    /// accepted, and revoking twice just rewrites the same entry.
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        let claims = match self.decode(token) {
            Ok(c) => c,
            Err(_) => return Ok(()),
        };

        let ttl = claims.remaining_ttl_seconds().max(MIN_BLACKLIST_TTL_SECS);
        self.cache
            .set(
                &token_blacklist(token),
                &Utc::now().timestamp().to_string(),
                Duration::from_secs(ttl),
            )
            .await
    }

    /// Signature + expiry check without the revocation lookup.
    fn decode(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid token signature")
                }
                _ => AppError::authentication(format!("Token validation failed: {e}")),
            }
        })?;
        Ok(data.claims)
    }

    /// Revocation store lookup. A store outage is treated as not-revoked;
    /// the entry expires with the token anyway.
    async fn is_revoked(&self, token: &str) -> bool {
        self.cache
            .exists(&token_blacklist(token))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, Header};
    use opsdesk_cache::memory::MemoryCacheProvider;
    use opsdesk_core::config::cache::MemoryCacheConfig;

    fn authority() -> TokenAuthority {
        let cache = Arc::new(CacheManager::from_provider(Arc::new(
            MemoryCacheProvider::new(&MemoryCacheConfig::default()),
        )));
        TokenAuthority::new(&AuthConfig::default(), cache)
    }

    #[tokio::test]
    async fn issued_token_validates_until_expiry() {
        let authority = authority();
        let issued = authority.issue(UserId::new(42), "alice", false).expect("issue");

        let claims = authority.validate(&issued.token).await.expect("validate");
        assert_eq!(claims.user_id(), UserId::new(42));
        assert_eq!(claims.username(), "alice");
        assert_eq!(issued.expires_in, 7200);
    }

    #[tokio::test]
    async fn extended_token_gets_the_long_lifetime() {
        let authority = authority();
        let issued = authority.issue(UserId::new(1), "bob", true).expect("issue");
        assert_eq!(issued.expires_in, 604_800);

        let claims = authority.validate(&issued.token).await.expect("validate");
        assert!(claims.exp - claims.iat >= 604_800);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let authority = authority();
        // Craft a token whose expiry is already past, signed with the
        // authority's own key.
        let claims = Claims {
            sub: "alice".into(),
            uid: 42,
            iat: Utc::now().timestamp() - 3600,
            exp: Utc::now().timestamp() - 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &authority.encoding_key,
        )
        .expect("encode");

        let err = authority.validate(&token).await.expect_err("must fail");
        assert!(err.is_authentication());
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let authority = authority();
        let other = {
            let cache = Arc::new(CacheManager::from_provider(Arc::new(
                MemoryCacheProvider::new(&MemoryCacheConfig::default()),
            )));
            let config = AuthConfig {
                secret: "a-completely-different-secret".into(),
                ..AuthConfig::default()
            };
            TokenAuthority::new(&config, cache)
        };

        let issued = other.issue(UserId::new(9), "eve", false).expect("issue");
        let err = authority.validate(&issued.token).await.expect_err("must fail");
        assert!(err.is_authentication());
    }

    #[tokio::test]
    async fn revoked_token_never_validates_again() {
        let authority = authority();
        let issued = authority.issue(UserId::new(7), "carol", false).expect("issue");
        authority.validate(&issued.token).await.expect("valid before revoke");

        authority.revoke(&issued.token).await.expect("revoke");

        assert!(authority.validate(&issued.token).await.is_err());
        // Still revoked on a second look.
        assert!(authority.validate(&issued.token).await.is_err());

        // A fresh token for the same user is unaffected. Issued with the
        // extended lifetime so its bytes differ even within the same second.
        let second = authority.issue(UserId::new(7), "carol", true).expect("issue");
        authority.validate(&second.token).await.expect("second token valid");
    }

    #[tokio::test]
    async fn revoking_garbage_is_silently_accepted() {
        let authority = authority();
        authority.revoke("not-a-token").await.expect("idempotent revoke");
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() {
        let authority = authority();
        assert!(authority.validate("garbage.token.value").await.is_err());
    }
}
