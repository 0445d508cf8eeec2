//! Individual push connection handle.

use std::sync::atomic::{AtomicU8, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use opsdesk_core::types::UserId;

use crate::event::EventFrame;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

const STATE_OPEN: u8 = 0;
const STATE_COMPLETED: u8 = 1;
const STATE_TIMED_OUT: u8 = 2;
const STATE_ERRORED: u8 = 3;

/// Why a connection was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Deliberate close: unsubscribe, logout, or replacement by a newer
    /// connection.
    Completed,
    /// Evicted by the idle watchdog.
    TimedOut,
    /// The client side went away mid-send.
    Errored,
}

impl CloseReason {
    fn as_state(self) -> u8 {
        match self {
            CloseReason::Completed => STATE_COMPLETED,
            CloseReason::TimedOut => STATE_TIMED_OUT,
            CloseReason::Errored => STATE_ERRORED,
        }
    }
}

/// Lifecycle state of a connection. Open is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Completed,
    TimedOut,
    Errored,
}

/// A handle to one live push channel.
///
/// Holds the sender half of the event channel plus enough metadata for the
/// hub to identify and expire it. The state makes exactly one transition,
/// from open to a terminal state; whoever wins that transition owns the
/// teardown.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection id, used to tell a stale handle from its
    /// replacement.
    pub id: ConnectionId,
    /// User this channel belongs to.
    pub user_id: UserId,
    /// Sender for outbound event frames.
    sender: mpsc::Sender<EventFrame>,
    /// When the channel was opened.
    pub connected_at: DateTime<Utc>,
    /// Current lifecycle state.
    state: AtomicU8,
}

impl ConnectionHandle {
    pub fn new(user_id: UserId, sender: mpsc::Sender<EventFrame>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            sender,
            connected_at: Utc::now(),
            state: AtomicU8::new(STATE_OPEN),
        }
    }

    /// Current state.
    pub fn state(&self) -> ConnectionState {
        match self.state.load(Ordering::SeqCst) {
            STATE_OPEN => ConnectionState::Open,
            STATE_COMPLETED => ConnectionState::Completed,
            STATE_TIMED_OUT => ConnectionState::TimedOut,
            _ => ConnectionState::Errored,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.load(Ordering::SeqCst) == STATE_OPEN
    }

    /// Move the connection to a terminal state.
    ///
    /// Returns `true` for the caller that performed the transition; later
    /// callers see `false` and must not tear down again.
    pub fn terminate(&self, reason: CloseReason) -> bool {
        self.state
            .compare_exchange(
                STATE_OPEN,
                reason.as_state(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok()
    }

    /// Push a frame to the client without waiting.
    ///
    /// Any write failure, a full buffer included, errors the connection:
    /// a client that stopped draining its channel is assumed dead.
    /// Returns whether the frame was delivered.
    pub fn send(&self, frame: EventFrame) -> bool {
        if !self.is_open() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(
                    connection_id = %self.id,
                    user_id = %self.user_id,
                    "Push buffer full, closing stalled channel"
                );
                self.terminate(CloseReason::Errored);
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.terminate(CloseReason::Errored);
                false
            }
        }
    }
}
