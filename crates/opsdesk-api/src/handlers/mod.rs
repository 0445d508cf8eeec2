//! HTTP handlers.

pub mod auth;
pub mod health;
pub mod presence;
pub mod sse;
