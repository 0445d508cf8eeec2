//! # opsdesk-service
//!
//! The layer between committed business mutations and the push hub:
//! publishers that enrich events with record-store counts and fan them out,
//! plus the config-seeded record stores used for development and tests.

pub mod directory;
pub mod publisher;

pub use directory::{InMemoryRecords, StaticDirectory};
pub use publisher::{
    AnnouncementPublisher, AnnouncementTarget, MessagePublisher, TodoPublisher, UnreadPublisher,
};
