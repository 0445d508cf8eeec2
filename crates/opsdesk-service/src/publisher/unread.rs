//! Unread counter refresh.

use std::sync::Arc;

use tracing::warn;

use opsdesk_core::traits::{MessageRecords, TodoRecords};
use opsdesk_core::types::UserId;
use opsdesk_push::{EventFrame, EventKind, EventPayload, PushHub};

/// Pushes an `unread_update` event after a read-state mutation, so a
/// connected client can refresh its badges without polling.
#[derive(Debug, Clone)]
pub struct UnreadPublisher {
    hub: PushHub,
    messages: Arc<dyn MessageRecords>,
    todos: Arc<dyn TodoRecords>,
}

impl UnreadPublisher {
    pub fn new(
        hub: PushHub,
        messages: Arc<dyn MessageRecords>,
        todos: Arc<dyn TodoRecords>,
    ) -> Self {
        Self { hub, messages, todos }
    }

    /// Push fresh unread and pending counts to the user. Each count is
    /// fetched independently; a failed fetch leaves its field out.
    pub async fn refresh(&self, user_id: UserId) {
        let mut payload = EventPayload::of(EventKind::UnreadUpdate);

        match self.messages.count_unread(user_id).await {
            Ok(count) => payload = payload.with_unread_count(count),
            Err(err) => warn!(%user_id, error = %err, "Unread count unavailable"),
        }
        match self.todos.count_pending(user_id).await {
            Ok(count) => payload = payload.with_pending_todo_count(count),
            Err(err) => warn!(%user_id, error = %err, "Pending count unavailable"),
        }

        self.hub
            .send_to_user(user_id, EventFrame::new(EventKind::UnreadUpdate, payload));
    }
}
