//! Server-Sent Events (SSE) stream of notifications.

use std::convert::Infallible;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tokio_stream::{Stream, StreamExt};

use homedash_app::ports::{StateStorage, StatusClient};
use homedash_domain::notification::{Notification, NotificationLevel};

use crate::state::AppState;

/// Query parameters for `GET /api/notifications/stream`.
#[derive(Debug, Default, Deserialize)]
pub struct StreamQuery {
    /// Only forward notifications of this level.
    pub level: Option<NotificationLevel>,
}

/// `GET /api/notifications/stream` — SSE stream of notifications.
///
/// Each notification is sent as JSON with its level as the event name. The
/// stream continues until the client disconnects.
pub async fn stream<S, C>(
    State(state): State<AppState<S, C>>,
    Query(query): Query<StreamQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    let feed = match query.level {
        Some(level) => state.notification_bus.subscribe_to(level),
        None => state.notification_bus.subscribe(),
    };
    let events = feed
        .into_stream()
        .filter_map(|notification| to_event(&notification).map(Ok));

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// `GET /api/notifications/current` — the notification still on display,
/// or `204 No Content`.
pub async fn current<S, C>(State(state): State<AppState<S, C>>) -> Response
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    match state.notification_bus.current() {
        Some(notification) => Json(notification).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

fn to_event(notification: &Notification) -> Option<Event> {
    let name = if notification.is_error() {
        "error"
    } else {
        "success"
    };
    match Event::default().event(name).json_data(notification) {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::warn!(%err, "failed to serialize notification for SSE stream");
            None
        }
    }
}
