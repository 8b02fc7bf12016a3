//! Room — a named container of devices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::device::{Device, DeviceKind};
use crate::error::{HomeError, NotFoundError, ValidationError};
use crate::id::{DeviceKey, RoomId};

/// A room and the devices it holds, keyed by device key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    #[serde(default)]
    pub devices: BTreeMap<DeviceKey, Device>,
}

impl Room {
    /// Check the room's own invariants and those of every device in it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyRoomName`] or the first failing device
    /// invariant.
    pub fn validate(&self, id: &RoomId) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyRoomName);
        }
        self.devices
            .iter()
            .try_for_each(|(key, device)| device.validate(id, key))
    }

    /// Look up the device stored under `key` and narrow it to one variant.
    ///
    /// `extract` is one of the `Device::as_*` accessors; `expected` names the
    /// kind it accepts.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::NotFound`] when no device is stored under `key`,
    /// and [`HomeError::Validation`] when it has another type.
    pub fn device_as<T>(
        &self,
        id: &RoomId,
        key: &DeviceKey,
        expected: DeviceKind,
        extract: impl FnOnce(&Device) -> Option<T>,
    ) -> Result<T, HomeError> {
        let device = self
            .devices
            .get(key)
            .ok_or_else(|| NotFoundError::device(id, key))?;
        extract(device).ok_or_else(|| {
            ValidationError::WrongDeviceType {
                room: id.clone(),
                device: key.clone(),
                expected,
                actual: device.kind(),
            }
            .into()
        })
    }

    /// Return a copy of this room with `key` replaced by `device`.
    #[must_use]
    pub fn with_device(&self, key: DeviceKey, device: Device) -> Self {
        let mut devices = self.devices.clone();
        devices.insert(key, device);
        Self {
            name: self.name.clone(),
            devices,
        }
    }

    /// Number of lights currently on.
    #[must_use]
    pub fn lights_on(&self) -> usize {
        self.devices
            .values()
            .filter(|device| matches!(device, Device::Light(light) if light.is_on))
            .count()
    }

    /// Number of powered-on devices (thermostats excluded).
    #[must_use]
    pub fn active_devices(&self) -> usize {
        self.devices.values().filter(|d| d.is_active()).count()
    }
}
