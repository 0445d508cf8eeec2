//! SSE subscription handlers.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::Stream;
use futures::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tracing::warn;

use crate::dto::response::{ApiResponse, MessageResponse, OnlineCountResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /sse/subscribe
///
/// Opens the long-lived event stream for the authenticated user,
/// replacing any previous stream they had. The first event is always
/// `connected`.
pub async fn subscribe(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (_, rx) = state.hub.open(auth.user_id);

    let stream = ReceiverStream::new(rx).map(|frame| -> Result<Event, Infallible> {
        let event = Event::default().event(frame.kind.as_str());
        match event.json_data(&frame.payload) {
            Ok(event) => Ok(event),
            Err(err) => {
                warn!(kind = %frame.kind, error = %err, "Failed to encode event payload");
                Ok(Event::default().event(frame.kind.as_str()))
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// DELETE /sse/unsubscribe
pub async fn unsubscribe(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<ApiResponse<MessageResponse>> {
    state.hub.close(auth.user_id);
    Json(ApiResponse::ok(MessageResponse {
        message: "Unsubscribed".to_string(),
    }))
}

/// GET /sse/online-count
///
/// Registered push channels in this process; a per-process figure by
/// design, not cluster-wide.
pub async fn online_count(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Json<ApiResponse<OnlineCountResponse>> {
    Json(ApiResponse::ok(OnlineCountResponse {
        count: state.hub.connection_count(),
    }))
}
