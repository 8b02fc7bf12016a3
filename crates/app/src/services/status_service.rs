//! Status service — remote views with stale-response protection.
//!
//! Each view (system status, room list, room detail, device list) lives in its
//! own slot. Every fetch draws a ticket from a shared counter, and a response
//! only lands in its slot when its ticket is newer than the last one applied
//! there, so a slow response never overwrites a fresher one.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::Mutex;

use homedash_domain::error::HomeError;
use homedash_domain::remote::{RemoteDevice, RoomDetail, RoomSummary, SystemStatus};

use crate::ports::StatusClient;

/// Lifecycle of one remote view.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

#[derive(Debug)]
struct Slot<T> {
    state: LoadState<T>,
    applied: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            state: LoadState::Idle,
            applied: 0,
        }
    }
}

impl<T: Clone> Slot<T> {
    /// Mark the slot as loading on behalf of `ticket`, unless a newer
    /// response has already settled it or a value is on display.
    fn begin(&mut self, ticket: u64) {
        if ticket > self.applied && !matches!(self.state, LoadState::Loaded(_)) {
            self.state = LoadState::Loading;
        }
    }

    fn settle(&mut self, ticket: u64, result: &Result<T, HomeError>) -> bool {
        if ticket <= self.applied {
            return false;
        }
        self.applied = ticket;
        self.state = match result {
            Ok(value) => LoadState::Loaded(value.clone()),
            Err(err) => LoadState::Failed(err.to_string()),
        };
        true
    }
}

#[derive(Debug, Default)]
struct Slots {
    status: Slot<SystemStatus>,
    rooms: Slot<Vec<RoomSummary>>,
    room_detail: Slot<RoomDetail>,
    devices: Slot<Vec<RemoteDevice>>,
}

/// Point-in-time copy of every remote view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusSnapshot {
    pub status: LoadState<SystemStatus>,
    pub rooms: LoadState<Vec<RoomSummary>>,
    pub room_detail: LoadState<RoomDetail>,
    pub devices: LoadState<Vec<RemoteDevice>>,
}

type Select<T> = for<'a> fn(&'a mut Slots) -> &'a mut Slot<T>;

/// Application service fronting a [`StatusClient`].
pub struct StatusService<C> {
    client: C,
    tickets: AtomicU64,
    slots: Mutex<Slots>,
}

impl<C: StatusClient + Send + Sync> StatusService<C> {
    /// Create a new service backed by the given client.
    pub fn new(client: C) -> Self {
        Self {
            client,
            tickets: AtomicU64::new(0),
            slots: Mutex::new(Slots::default()),
        }
    }

    /// Fetch the whole-system snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Remote`] when the server cannot be reached or
    /// answers with an error.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_status(&self) -> Result<SystemStatus, HomeError> {
        self.track("status", |slots| &mut slots.status, self.client.get_system_status())
            .await
    }

    /// Fetch the room list.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Remote`] on failure.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_rooms(&self) -> Result<Vec<RoomSummary>, HomeError> {
        self.track("rooms", |slots| &mut slots.rooms, self.client.list_rooms())
            .await
    }

    /// Fetch one room's detail.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Remote`] on failure.
    #[tracing::instrument(skip(self))]
    pub async fn load_room_detail(&self, name: &str) -> Result<RoomDetail, HomeError> {
        self.track(
            "room_detail",
            |slots| &mut slots.room_detail,
            self.client.get_room_detail(name),
        )
        .await
    }

    /// Fetch the device list, optionally for one room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Remote`] on failure.
    #[tracing::instrument(skip(self))]
    pub async fn load_devices(&self, room: Option<&str>) -> Result<Vec<RemoteDevice>, HomeError> {
        self.track("devices", |slots| &mut slots.devices, self.client.list_devices(room))
            .await
    }

    /// Fetch one device. Not cached.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Remote`] on failure.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: &str) -> Result<RemoteDevice, HomeError> {
        self.client.get_device(id).await
    }

    /// Forward a chat message and return the reply.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::Remote`] on failure.
    #[tracing::instrument(skip(self, message))]
    pub async fn send_chat_message(&self, message: &str) -> Result<serde_json::Value, HomeError> {
        self.client.send_chat_message(message).await
    }

    /// Copy of every view as last applied.
    pub async fn snapshot(&self) -> StatusSnapshot {
        let slots = self.slots.lock().await;
        StatusSnapshot {
            status: slots.status.state.clone(),
            rooms: slots.rooms.state.clone(),
            room_detail: slots.room_detail.state.clone(),
            devices: slots.devices.state.clone(),
        }
    }

    async fn track<T, F>(
        &self,
        view: &'static str,
        select: Select<T>,
        fetch: F,
    ) -> Result<T, HomeError>
    where
        T: Clone + Send,
        F: Future<Output = Result<T, HomeError>> + Send,
    {
        let ticket = self.tickets.fetch_add(1, Ordering::Relaxed) + 1;
        select(&mut *self.slots.lock().await).begin(ticket);

        let result = fetch.await;

        let mut slots = self.slots.lock().await;
        if !select(&mut slots).settle(ticket, &result) {
            tracing::debug!(view, ticket, "discarding stale response");
        }
        result
    }
}
