//! JSON handlers for the local home state.

use axum::Json;
use axum::extract::{Path, State};

use homedash_app::ports::{StateStorage, StatusClient};
use homedash_domain::action::ActionRequest;
use homedash_domain::home::{HomeState, RoomOverview};
use homedash_domain::id::RoomId;
use homedash_domain::room::Room;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/home`
pub async fn get<S, C>(State(state): State<AppState<S, C>>) -> Json<HomeState>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    Json(HomeState::clone(&*state.home_store.state().await))
}

/// `GET /api/home/summary`
pub async fn summary<S, C>(State(state): State<AppState<S, C>>) -> Json<Vec<RoomOverview>>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    Json(state.home_store.state().await.summary())
}

/// `GET /api/rooms/{room}`
pub async fn room<S, C>(
    State(state): State<AppState<S, C>>,
    Path(room): Path<String>,
) -> Result<Json<Room>, ApiError>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    let id = RoomId::new(room).map_err(homedash_domain::error::HomeError::from)?;
    let home = state.home_store.state().await;
    let room = home.room(&id)?.clone();
    Ok(Json(room))
}

/// `POST /api/actions`
pub async fn dispatch<S, C>(
    State(state): State<AppState<S, C>>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<HomeState>, ApiError>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    let next = state.home_store.dispatch_request(request).await?;
    Ok(Json(HomeState::clone(&next)))
}

/// `POST /api/reset`
pub async fn reset<S, C>(State(state): State<AppState<S, C>>) -> Result<Json<HomeState>, ApiError>
where
    S: StateStorage + Send + Sync + 'static,
    C: StatusClient + Send + Sync + 'static,
{
    let next = state.home_store.reset().await?;
    Ok(Json(HomeState::clone(&next)))
}
