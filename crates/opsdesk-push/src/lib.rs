//! # opsdesk-push
//!
//! In-process push hub for OpsDesk. Holds one live event channel per user,
//! replaces the channel on reconnect, and evicts idle channels with a
//! per-connection watchdog. Delivery is fire-and-forget: a failed send
//! tears the connection down and is never an error for the caller.

pub mod connection;
pub mod event;
pub mod hub;

pub use connection::{CloseReason, ConnectionHandle, ConnectionState};
pub use event::{EventFrame, EventKind, EventPayload};
pub use hub::PushHub;
