//! Event publishers.
//!
//! Each publisher is called after a business mutation has committed. It
//! enriches the event with counts from the record stores and hands it to
//! the push hub. Publishing never fails the caller: enrichment errors are
//! logged and the event goes out degraded, and a user without a live
//! channel is a quiet miss.

pub mod announcement;
pub mod message;
pub mod todo;
pub mod unread;

pub use announcement::{AnnouncementPublisher, AnnouncementTarget};
pub use message::MessagePublisher;
pub use todo::TodoPublisher;
pub use unread::UnreadPublisher;
