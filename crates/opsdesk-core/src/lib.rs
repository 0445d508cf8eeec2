//! # opsdesk-core
//!
//! Core crate for OpsDesk. Contains configuration schemas, typed
//! identifiers, the traits for external collaborators (cache store and
//! record stores), and the unified error system.
//!
//! This crate has **no** internal dependencies on other OpsDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
