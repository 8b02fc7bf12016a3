//! JSON handlers proxying the remote status server.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use homedash_app::ports::{StateStorage, StatusClient};
use homedash_domain::remote::{
    ChatRequest, DevicesEnvelope, RemoteDevice, RoomDetail, RoomsEnvelope, SystemStatus,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Query string of `GET /api/remote/devices`.
#[derive(Debug, Deserialize)]
pub struct DevicesQuery {
    pub room: Option<String>,
}

/// `GET /api/remote/status`
pub async fn status<S, C>(
    State(state): State<AppState<S, C>>,
) -> Result<Json<SystemStatus>, ApiError>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    Ok(Json(state.status_service.refresh_status().await?))
}

/// `GET /api/remote/rooms`
pub async fn rooms<S, C>(
    State(state): State<AppState<S, C>>,
) -> Result<Json<RoomsEnvelope>, ApiError>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    let rooms = state.status_service.refresh_rooms().await?;
    Ok(Json(RoomsEnvelope { rooms }))
}

/// `GET /api/remote/rooms/{name}`
pub async fn room_detail<S, C>(
    State(state): State<AppState<S, C>>,
    Path(name): Path<String>,
) -> Result<Json<RoomDetail>, ApiError>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    Ok(Json(state.status_service.load_room_detail(&name).await?))
}

/// `GET /api/remote/devices[?room=]`
pub async fn devices<S, C>(
    State(state): State<AppState<S, C>>,
    Query(query): Query<DevicesQuery>,
) -> Result<Json<DevicesEnvelope>, ApiError>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    let devices = state
        .status_service
        .load_devices(query.room.as_deref())
        .await?;
    Ok(Json(DevicesEnvelope { devices }))
}

/// `GET /api/remote/devices/{id}`
pub async fn device<S, C>(
    State(state): State<AppState<S, C>>,
    Path(id): Path<String>,
) -> Result<Json<RemoteDevice>, ApiError>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    Ok(Json(state.status_service.get_device(&id).await?))
}

/// `POST /api/remote/chat`
pub async fn chat<S, C>(
    State(state): State<AppState<S, C>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<serde_json::Value>, ApiError>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    let reply = state
        .status_service
        .send_chat_message(&request.message)
        .await?;
    Ok(Json(reply))
}
