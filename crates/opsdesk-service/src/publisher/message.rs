//! Private message notifications.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use opsdesk_core::traits::MessageRecords;
use opsdesk_core::types::UserId;
use opsdesk_push::{EventFrame, EventKind, EventPayload, PushHub};

/// Pushes a `message` event to the receiver of a new private message.
#[derive(Debug, Clone)]
pub struct MessagePublisher {
    hub: PushHub,
    messages: Arc<dyn MessageRecords>,
}

impl MessagePublisher {
    pub fn new(hub: PushHub, messages: Arc<dyn MessageRecords>) -> Self {
        Self { hub, messages }
    }

    /// Notify the receiver of a message that just landed. The message
    /// itself is already stored; this only pushes the notification,
    /// enriched with the receiver's current unread count.
    pub async fn message_sent(&self, receiver: UserId, sender_name: &str, preview: &str) {
        let mut payload = EventPayload::of(EventKind::Message)
            .with_message(preview)
            .with_data(json!({ "from": sender_name }));

        match self.messages.count_unread(receiver).await {
            Ok(count) => payload = payload.with_unread_count(count),
            Err(err) => {
                warn!(%receiver, error = %err, "Unread count unavailable, sending degraded event");
            }
        }

        if !self.hub.send_to_user(receiver, EventFrame::new(EventKind::Message, payload)) {
            debug!(%receiver, "Message event dropped, receiver not connected");
        }
    }
}
