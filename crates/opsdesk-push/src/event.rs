//! Event frames pushed to connected clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The named event types clients subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Handshake confirmation, sent once when a channel opens.
    Connected,
    /// A direct message notification.
    Message,
    /// A system announcement.
    Announcement,
    /// A to-do item notification.
    Todo,
    /// Unread counter refresh.
    UnreadUpdate,
}

impl EventKind {
    /// Wire name used as the SSE event field.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Connected => "connected",
            EventKind::Message => "message",
            EventKind::Announcement => "announcement",
            EventKind::Todo => "todo",
            EventKind::UnreadUpdate => "unread_update",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The JSON body of a pushed event.
///
/// Every field except `type` is optional; each event kind fills in the
/// fields it needs and clients ignore the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    /// Wire name of the event, duplicated into the body for clients
    /// that read the data without the SSE event field.
    #[serde(rename = "type")]
    pub kind: String,
    /// Current unread message count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_count: Option<i64>,
    /// Current unread announcement count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unread_announcement_count: Option<i64>,
    /// Current pending to-do count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_todo_count: Option<i64>,
    /// Human-readable text, e.g. an announcement preview.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Arbitrary structured payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl EventPayload {
    /// Empty payload for the given event kind.
    pub fn of(kind: EventKind) -> Self {
        Self {
            kind: kind.as_str().to_string(),
            unread_count: None,
            unread_announcement_count: None,
            pending_todo_count: None,
            message: None,
            data: None,
        }
    }

    pub fn with_unread_count(mut self, count: i64) -> Self {
        self.unread_count = Some(count);
        self
    }

    pub fn with_unread_announcement_count(mut self, count: i64) -> Self {
        self.unread_announcement_count = Some(count);
        self
    }

    pub fn with_pending_todo_count(mut self, count: i64) -> Self {
        self.pending_todo_count = Some(count);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// One complete event as it travels from a publisher to a client channel.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFrame {
    /// SSE event name.
    pub kind: EventKind,
    /// JSON body.
    pub payload: EventPayload,
}

impl EventFrame {
    pub fn new(kind: EventKind, payload: EventPayload) -> Self {
        Self { kind, payload }
    }

    /// The handshake frame sent when a channel opens.
    pub fn connected() -> Self {
        Self::new(
            EventKind::Connected,
            EventPayload::of(EventKind::Connected).with_message("connected"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_serializes_with_camel_case_fields() {
        let payload = EventPayload::of(EventKind::UnreadUpdate)
            .with_unread_count(3)
            .with_unread_announcement_count(2)
            .with_pending_todo_count(1);
        let json = serde_json::to_value(&payload).expect("serialize");

        assert_eq!(json["type"], "unread_update");
        assert_eq!(json["unreadCount"], 3);
        assert_eq!(json["unreadAnnouncementCount"], 2);
        assert_eq!(json["pendingTodoCount"], 1);
        assert!(json.get("message").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn connected_frame_carries_the_handshake_message() {
        let frame = EventFrame::connected();
        assert_eq!(frame.kind, EventKind::Connected);
        assert_eq!(frame.payload.message.as_deref(), Some("connected"));
    }

    #[test]
    fn event_kinds_use_stable_wire_names() {
        assert_eq!(EventKind::Connected.as_str(), "connected");
        assert_eq!(EventKind::Message.as_str(), "message");
        assert_eq!(EventKind::Announcement.as_str(), "announcement");
        assert_eq!(EventKind::Todo.as_str(), "todo");
        assert_eq!(EventKind::UnreadUpdate.as_str(), "unread_update");
    }
}
