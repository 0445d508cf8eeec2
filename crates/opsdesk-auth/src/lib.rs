//! # opsdesk-auth
//!
//! The token authority for OpsDesk: issues signed, time-limited session
//! tokens, validates signature/expiry/revocation, and maintains the
//! revocation list in the shared store.

pub mod jwt;

pub use jwt::authority::{IssuedToken, TokenAuthority};
pub use jwt::claims::Claims;
