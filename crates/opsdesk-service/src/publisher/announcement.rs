//! Announcement notifications.

use serde_json::json;
use tracing::debug;

use opsdesk_core::types::UserId;
use opsdesk_push::{EventFrame, EventKind, EventPayload, PushHub};

/// Maximum length of the content preview pushed with an announcement.
const PREVIEW_CHARS: usize = 100;

/// Who an announcement goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnouncementTarget {
    /// Every connected user.
    Everyone,
    /// A named set of users.
    Users(Vec<UserId>),
}

/// Pushes `announcement` events when a notice is published.
#[derive(Debug, Clone)]
pub struct AnnouncementPublisher {
    hub: PushHub,
}

impl AnnouncementPublisher {
    pub fn new(hub: PushHub) -> Self {
        Self { hub }
    }

    /// Push a freshly published notice to its audience. Targeted users
    /// without a live channel are quiet misses.
    pub fn published(&self, title: &str, content: &str, target: AnnouncementTarget) {
        let payload = EventPayload::of(EventKind::Announcement)
            .with_message(preview(content))
            .with_data(json!({ "title": title }));
        let frame = EventFrame::new(EventKind::Announcement, payload);

        match target {
            AnnouncementTarget::Everyone => {
                let delivered = self.hub.send_to_all(frame);
                debug!(delivered, title, "Announcement broadcast");
            }
            AnnouncementTarget::Users(users) => {
                for user_id in users {
                    self.hub.send_to_user(user_id, frame.clone());
                }
            }
        }
    }
}

/// First 100 characters of the content, on a character boundary.
fn preview(content: &str) -> String {
    content.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_core::config::PushConfig;

    #[tokio::test]
    async fn everyone_target_reaches_all_connected_users() {
        let hub = PushHub::new(&PushConfig::default());
        let (_, mut rx_a) = hub.open(UserId::new(1));
        let (_, mut rx_b) = hub.open(UserId::new(2));
        rx_a.recv().await.expect("handshake a");
        rx_b.recv().await.expect("handshake b");

        let publisher = AnnouncementPublisher::new(hub);
        publisher.published("Maintenance", "Window at 02:00", AnnouncementTarget::Everyone);

        for rx in [&mut rx_a, &mut rx_b] {
            let frame = rx.recv().await.expect("announcement");
            assert_eq!(frame.kind, EventKind::Announcement);
            assert_eq!(frame.payload.message.as_deref(), Some("Window at 02:00"));
            assert_eq!(frame.payload.data, Some(json!({ "title": "Maintenance" })));
        }
    }

    #[tokio::test]
    async fn targeted_users_only_those_listed_receive_it() {
        let hub = PushHub::new(&PushConfig::default());
        let (_, mut rx_target) = hub.open(UserId::new(3));
        let (_, mut rx_other) = hub.open(UserId::new(4));
        rx_target.recv().await.expect("handshake");
        rx_other.recv().await.expect("handshake");

        let publisher = AnnouncementPublisher::new(hub);
        publisher.published(
            "Policy",
            "Review required",
            AnnouncementTarget::Users(vec![UserId::new(3), UserId::new(99)]),
        );

        let frame = rx_target.recv().await.expect("announcement");
        assert_eq!(frame.kind, EventKind::Announcement);
        assert!(rx_other.try_recv().is_err());
    }

    #[test]
    fn preview_truncates_to_one_hundred_characters() {
        let long = "x".repeat(250);
        assert_eq!(preview(&long).chars().count(), 100);
        assert_eq!(preview("short"), "short");
        // Multi-byte characters are cut on a boundary, not mid-codepoint.
        let kana = "あ".repeat(150);
        assert_eq!(preview(&kana).chars().count(), 100);
    }
}
