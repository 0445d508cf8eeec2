//! Presence tracking for OpsDesk.
//!
//! Presence is modelled as a TTL'd record per user in the shared store plus
//! a membership set used for fast enumeration. The record expiring is what
//! makes a user offline; the set is reconciled against the records on read.

pub mod record;
pub mod registry;

pub use record::PresenceRecord;
pub use registry::PresenceRegistry;
