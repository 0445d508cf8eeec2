//! Todo assignment notifications.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use opsdesk_core::traits::TodoRecords;
use opsdesk_core::types::UserId;
use opsdesk_push::{EventFrame, EventKind, EventPayload, PushHub};

/// Pushes a `todo` event to the assignee of a new task.
#[derive(Debug, Clone)]
pub struct TodoPublisher {
    hub: PushHub,
    todos: Arc<dyn TodoRecords>,
}

impl TodoPublisher {
    pub fn new(hub: PushHub, todos: Arc<dyn TodoRecords>) -> Self {
        Self { hub, todos }
    }

    /// Notify the assignee of a task that was just assigned, with the
    /// recomputed pending count.
    pub async fn assigned(&self, assignee: UserId, title: &str) {
        let mut payload = EventPayload::of(EventKind::Todo)
            .with_message(title)
            .with_data(json!({ "title": title }));

        match self.todos.count_pending(assignee).await {
            Ok(count) => payload = payload.with_pending_todo_count(count),
            Err(err) => {
                warn!(%assignee, error = %err, "Pending count unavailable, sending degraded event");
            }
        }

        if !self.hub.send_to_user(assignee, EventFrame::new(EventKind::Todo, payload)) {
            debug!(%assignee, "Todo event dropped, assignee not connected");
        }
    }
}
