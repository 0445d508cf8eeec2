//! `AuthUser` extractor.
//!
//! The authentication gate validates the bearer token and stores the
//! resolved identity in the request extensions; this extractor is how a
//! handler demands it. The gate itself never rejects, so the 401 for a
//! missing or invalid token materializes here.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use opsdesk_core::error::AppError;
use opsdesk_core::types::UserId;

use crate::error::ApiError;

/// Identity resolved by the authentication gate.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Numeric user id from the token.
    pub user_id: UserId,
    /// Login name from the token subject.
    pub username: String,
    /// Display name from the user store.
    pub display_name: String,
    /// Role codes from the user store.
    pub roles: Vec<String>,
}

/// Extracted authenticated identity, available to handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub CurrentUser);

impl std::ops::Deref for AuthUser {
    type Target = CurrentUser;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError(AppError::authentication("Authentication required")))
    }
}
