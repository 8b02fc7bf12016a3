//! Home state — the full snapshot of every room and device.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::device::{Device, Fan, Light, Oven, Thermostat, Tv};
use crate::error::{HomeError, NotFoundError, ValidationError};
use crate::id::RoomId;
use crate::room::Room;

/// Root of the state tree. Never mutated in place; see [`crate::action::reduce`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeState {
    pub rooms: BTreeMap<RoomId, Room>,
}

impl Default for HomeState {
    /// The factory configuration: four rooms, everything switched off.
    fn default() -> Self {
        let rooms = [
            (
                "comedor",
                "Comedor",
                vec![
                    Device::Light(Light::default()),
                    Device::Oven(Oven {
                        is_on: false,
                        temperature: 180,
                    }),
                ],
            ),
            (
                "dormitorio",
                "Dormitorio",
                vec![
                    Device::Light(Light::default()),
                    Device::Fan(Fan::default()),
                ],
            ),
            ("baño", "Baño", vec![Device::Light(Light::default())]),
            (
                "sala",
                "Sala de Estar",
                vec![
                    Device::Light(Light::default()),
                    Device::Tv(Tv::default()),
                    Device::Thermostat(Thermostat {
                        temperature: 22,
                        min_temp: 16,
                        max_temp: 30,
                    }),
                ],
            ),
        ]
        .into_iter()
        .map(|(id, name, devices)| {
            let room = Room {
                name: name.to_string(),
                devices: devices
                    .into_iter()
                    .map(|device| (device.kind().default_key(), device))
                    .collect(),
            };
            (RoomId::from_static(id), room)
        })
        .collect();

        Self { rooms }
    }
}

impl HomeState {
    /// Look up a room.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NotFound`] for an unknown room id.
    pub fn room(&self, id: &RoomId) -> Result<&Room, HomeError> {
        self.rooms
            .get(id)
            .ok_or_else(|| NotFoundError::room(id).into())
    }

    /// Return a copy of this state with `id` replaced by `room`.
    ///
    /// Rooms other than `id` are cloned as-is.
    #[must_use]
    pub fn with_room(&self, id: RoomId, room: Room) -> Self {
        let mut rooms = self.rooms.clone();
        rooms.insert(id, room);
        Self { rooms }
    }

    /// Check every room and device invariant.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.rooms
            .iter()
            .try_for_each(|(id, room)| room.validate(id))
    }

    /// Per-room counters for the dashboard overview, in room-id order.
    #[must_use]
    pub fn summary(&self) -> Vec<RoomOverview> {
        self.rooms
            .iter()
            .map(|(id, room)| RoomOverview {
                id: id.clone(),
                name: room.name.clone(),
                lights_on: room.lights_on(),
                active_devices: room.active_devices(),
                total_devices: room.devices.len(),
            })
            .collect()
    }
}

/// Dashboard counters for one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOverview {
    pub id: RoomId,
    pub name: String,
    pub lights_on: usize,
    pub active_devices: usize,
    pub total_devices: usize,
}
