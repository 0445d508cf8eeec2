//! # opsdesk-api
//!
//! The HTTP surface of OpsDesk: auth endpoints, the SSE subscription
//! endpoint, presence queries, and health. Authentication is enrichment
//! performed by a gate middleware; handlers that need an identity use the
//! `AuthUser` extractor and answer 401 themselves when it is missing.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
