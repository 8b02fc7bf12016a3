//! Test doubles shared by the handler tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use homedash_app::notification_bus::InProcessNotificationBus;
use homedash_app::ports::{StateStorage, StatusClient};
use homedash_app::services::home_store::HomeStore;
use homedash_app::services::status_service::StatusService;
use homedash_domain::device::DeviceKind;
use homedash_domain::error::{HomeError, RemoteError};
use homedash_domain::remote::{RemoteDevice, RoomDetail, RoomSummary, SystemStatus};

use crate::state::AppState;

#[derive(Default)]
pub struct InMemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl StateStorage for InMemoryStorage {
    fn read(&self, key: &str) -> impl Future<Output = Result<Option<String>, HomeError>> + Send {
        let value = self.entries.lock().unwrap().get(key).cloned();
        async { Ok(value) }
    }

    fn write(&self, key: &str, value: &str) -> impl Future<Output = Result<(), HomeError>> + Send {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        async { Ok(()) }
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), HomeError>> + Send {
        self.entries.lock().unwrap().remove(key);
        async { Ok(()) }
    }
}

/// Answers with fixed data; any id or room named `missing` fails like a 404
/// from the server.
pub struct StubStatusClient;

pub fn light(id: &str, room: &str) -> RemoteDevice {
    RemoteDevice {
        id: id.to_string(),
        kind: DeviceKind::Light,
        room: room.to_string(),
        state: serde_json::json!(true),
    }
}

pub fn summary(name: &str) -> RoomSummary {
    RoomSummary {
        name: name.to_string(),
        kind: "room".to_string(),
        light_count: 1,
        thermostat_count: 0,
        fan_count: 0,
        oven_count: 0,
        total_devices: 1,
    }
}

fn not_found(what: &str) -> HomeError {
    RemoteError {
        status: Some(404),
        message: format!("{what} not found"),
    }
    .into()
}

impl StatusClient for StubStatusClient {
    fn list_rooms(&self) -> impl Future<Output = Result<Vec<RoomSummary>, HomeError>> + Send {
        async { Ok(vec![summary("cocina"), summary("sala")]) }
    }

    fn get_room_detail(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<RoomDetail, HomeError>> + Send {
        let result = if name == "missing" {
            Err(not_found("Room"))
        } else {
            Ok(RoomDetail {
                room: name.to_string(),
                kind: "room".to_string(),
                devices: vec![light("l1", name)],
                light_count: 1,
                thermostat_count: 0,
                fan_count: 0,
                oven_count: 0,
            })
        };
        async { result }
    }

    fn list_devices(
        &self,
        room: Option<&str>,
    ) -> impl Future<Output = Result<Vec<RemoteDevice>, HomeError>> + Send {
        let devices = match room {
            Some(room) => vec![light("l1", room)],
            None => vec![light("l1", "cocina"), light("l2", "sala")],
        };
        async { Ok(devices) }
    }

    fn get_device(&self, id: &str) -> impl Future<Output = Result<RemoteDevice, HomeError>> + Send {
        let result = if id == "missing" {
            Err(not_found("Device"))
        } else {
            Ok(light(id, "sala"))
        };
        async { result }
    }

    fn get_system_status(&self) -> impl Future<Output = Result<SystemStatus, HomeError>> + Send {
        async {
            Ok(SystemStatus {
                rooms: vec![summary("sala")],
                devices: vec![light("l2", "sala")],
                total_rooms: 1,
                total_devices: 1,
            })
        }
    }

    fn send_chat_message(
        &self,
        message: &str,
    ) -> impl Future<Output = Result<serde_json::Value, HomeError>> + Send {
        let reply = serde_json::json!({ "reply": format!("received: {message}") });
        async { Ok(reply) }
    }
}

pub type TestState = AppState<InMemoryStorage, StubStatusClient>;

pub async fn test_state() -> TestState {
    let bus = Arc::new(InProcessNotificationBus::new(16));
    let store = HomeStore::open(InMemoryStorage::default(), Arc::clone(&bus)).await;
    AppState::new(store, StatusService::new(StubStatusClient), bus)
}
