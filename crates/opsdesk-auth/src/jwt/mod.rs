//! JWT claims, key derivation, and the token authority.

pub mod authority;
pub mod claims;
pub mod keys;

pub use authority::TokenAuthority;
pub use claims::Claims;
