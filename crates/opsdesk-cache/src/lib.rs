//! # opsdesk-cache
//!
//! Shared store provider implementations for OpsDesk:
//!
//! - **memory**: in-process store using [moka](https://crates.io/crates/moka),
//!   for development and tests
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis)
//!   crate, the deployment default; presence and revocation state must be
//!   reachable from every process
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
