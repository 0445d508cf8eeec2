//! Traits for the external collaborators the core consumes.

pub mod cache;
pub mod records;

pub use cache::CacheProvider;
pub use records::{MessageRecords, TodoRecords, UserDirectory, UserSummary};
