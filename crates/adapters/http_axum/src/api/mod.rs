//! JSON API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod remote;
pub mod sse;

use axum::Router;
use axum::routing::{get, post};

use homedash_app::ports::{StateStorage, StatusClient};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, C>() -> Router<AppState<S, C>>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    Router::new()
        // Local home state
        .route("/home", get(home::get::<S, C>))
        .route("/home/summary", get(home::summary::<S, C>))
        .route("/rooms/{room}", get(home::room::<S, C>))
        .route("/actions", post(home::dispatch::<S, C>))
        .route("/reset", post(home::reset::<S, C>))
        // Notifications
        .route("/notifications/stream", get(sse::stream::<S, C>))
        .route("/notifications/current", get(sse::current::<S, C>))
        // Remote status server
        .route("/remote/status", get(remote::status::<S, C>))
        .route("/remote/rooms", get(remote::rooms::<S, C>))
        .route("/remote/rooms/{name}", get(remote::room_detail::<S, C>))
        .route("/remote/devices", get(remote::devices::<S, C>))
        .route("/remote/devices/{id}", get(remote::device::<S, C>))
        .route("/remote/chat", post(remote::chat::<S, C>))
}
