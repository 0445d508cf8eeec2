//! The push hub: one live channel per user.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use opsdesk_core::types::UserId;

use crate::connection::{CloseReason, ConnectionHandle, ConnectionId};
use crate::event::EventFrame;

/// Registry of live push channels, one per user.
///
/// Opening a channel for a user who already has one replaces the old
/// channel. Every channel gets a watchdog that evicts it after the idle
/// timeout; the watchdog checks the connection id so it never evicts a
/// replacement. State lives in this process only.
#[derive(Debug, Clone)]
pub struct PushHub {
    /// Live connections by user.
    connections: Arc<DashMap<UserId, Arc<ConnectionHandle>>>,
    /// Watchdog timeout.
    idle_timeout: Duration,
    /// Per-connection outbound buffer size.
    buffer_size: usize,
}

impl PushHub {
    pub fn new(config: &opsdesk_core::config::PushConfig) -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
            idle_timeout: Duration::from_secs(config.idle_timeout_seconds),
            buffer_size: config.channel_buffer_size,
        }
    }

    /// Open a push channel for a user, replacing any existing one.
    ///
    /// The handshake frame is queued before the receiver is handed back,
    /// so it is always the first event a client sees.
    pub fn open(&self, user_id: UserId) -> (Arc<ConnectionHandle>, mpsc::Receiver<EventFrame>) {
        let (tx, rx) = mpsc::channel(self.buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, tx));
        let conn_id = handle.id;

        if let Some(previous) = self.connections.insert(user_id, Arc::clone(&handle)) {
            if previous.terminate(CloseReason::Completed) {
                debug!(%user_id, replaced = %previous.id, "Replaced existing push channel");
            }
        }

        handle.send(EventFrame::connected());
        info!(%user_id, connection_id = %conn_id, "Push channel opened");

        self.spawn_watchdog(user_id, conn_id);
        (handle, rx)
    }

    /// Close a user's channel, if the one registered is still this user's
    /// current one. Idempotent.
    pub fn close(&self, user_id: UserId) {
        if let Some((_, handle)) = self.connections.remove(&user_id) {
            handle.terminate(CloseReason::Completed);
            info!(%user_id, connection_id = %handle.id, "Push channel closed");
        }
    }

    /// Deliver a frame to one user. Returns whether it was handed to a
    /// live channel. A dead channel is removed on the way.
    pub fn send_to_user(&self, user_id: UserId, frame: EventFrame) -> bool {
        let Some(handle) = self
            .connections
            .get(&user_id)
            .map(|entry| Arc::clone(entry.value()))
        else {
            return false;
        };

        if handle.send(frame) {
            return true;
        }
        if !handle.is_open() {
            self.remove_exact(user_id, handle.id);
        }
        false
    }

    /// Deliver a frame to every connected user. Returns the number of
    /// channels it was handed to.
    pub fn send_to_all(&self, frame: EventFrame) -> usize {
        let snapshot: Vec<Arc<ConnectionHandle>> = self
            .connections
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut delivered = 0;
        for handle in snapshot {
            if handle.send(frame.clone()) {
                delivered += 1;
            } else if !handle.is_open() {
                self.remove_exact(handle.user_id, handle.id);
            }
        }
        delivered
    }

    /// Whether the user currently has a channel registered.
    pub fn is_connected(&self, user_id: UserId) -> bool {
        self.connections.contains_key(&user_id)
    }

    /// Number of registered channels.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Remove the entry for `user_id` only if it is still the connection
    /// identified by `conn_id`. A replacement stays untouched.
    fn remove_exact(&self, user_id: UserId, conn_id: ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections
            .remove_if(&user_id, |_, handle| handle.id == conn_id)
            .map(|(_, handle)| handle)
    }

    fn spawn_watchdog(&self, user_id: UserId, conn_id: ConnectionId) {
        let hub = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(hub.idle_timeout).await;
            if let Some(handle) = hub.remove_exact(user_id, conn_id) {
                if handle.terminate(CloseReason::TimedOut) {
                    info!(%user_id, connection_id = %conn_id, "Push channel timed out");
                }
            }
        });
    }
}
