//! Shapes returned by the remote status API.
//!
//! These mirror the server's JSON and are not validated beyond
//! deserialization: the remote side owns them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::device::DeviceKind;

/// A device as reported by the status server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDevice {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub room: String,
    /// Free-form state: a boolean, a number, or an object depending on `kind`.
    #[serde(default)]
    pub state: Value,
}

/// Per-room counters from `GET /rooms` and `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub light_count: u32,
    #[serde(default)]
    pub thermostat_count: u32,
    #[serde(default)]
    pub fan_count: u32,
    #[serde(default)]
    pub oven_count: u32,
    #[serde(default)]
    pub total_devices: u32,
}

/// A single room with its devices, from `GET /rooms/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDetail {
    pub room: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub devices: Vec<RemoteDevice>,
    #[serde(default)]
    pub light_count: u32,
    #[serde(default)]
    pub thermostat_count: u32,
    #[serde(default)]
    pub fan_count: u32,
    #[serde(default)]
    pub oven_count: u32,
}

/// Whole-system snapshot from `GET /status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub rooms: Vec<RoomSummary>,
    #[serde(default)]
    pub devices: Vec<RemoteDevice>,
    #[serde(default)]
    pub total_rooms: u32,
    #[serde(default)]
    pub total_devices: u32,
}

/// `{"rooms": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomsEnvelope {
    pub rooms: Vec<RoomSummary>,
}

/// `{"devices": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevicesEnvelope {
    pub devices: Vec<RemoteDevice>,
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}
