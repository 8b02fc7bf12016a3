//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`HomeError`]
//! via `From`. The `Display` text of every variant is user-facing: it is what
//! ends up in error notifications.

use serde::Serialize;

use crate::device::DeviceKind;
use crate::id::{DeviceKey, RoomId};

/// Top-level error returned by every mutating or fetching operation.
#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    /// An action or value broke a domain invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced room or device does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The persistence backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote status API could not be reached or answered with an error.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl HomeError {
    /// Coarse category of the error, for callers that only branch on it.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage(_) => ErrorKind::Storage,
            Self::Remote(_) => ErrorKind::Remote,
        }
    }
}

/// Category of a [`HomeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    Remote,
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("device key must not be empty")]
    EmptyDeviceKey,

    #[error("room name must not be empty")]
    EmptyRoomName,

    #[error("device {room}/{device} is a {actual}, not a {expected}")]
    WrongDeviceType {
        room: RoomId,
        device: DeviceKey,
        expected: DeviceKind,
        actual: DeviceKind,
    },

    #[error("invalid fan speed `{0}`, use one of: off, baja, media, alta")]
    InvalidFanSpeed(String),

    #[error("invalid channel {0} (1-999)")]
    ChannelOutOfRange(i64),

    #[error("temperature must be between {min}°C and {max}°C, got {requested}°C")]
    TemperatureOutOfRange { requested: i32, min: i32, max: i32 },

    #[error("thermostat bounds are inverted: min {min}°C > max {max}°C")]
    InvertedThermostatBounds { min: i32, max: i32 },

    #[error("fan {room}/{device} reports power {is_on} with speed {speed}")]
    InconsistentFan {
        room: RoomId,
        device: DeviceKey,
        is_on: bool,
        speed: String,
    },

    #[error("field `{field}` must be a whole number, got {value}")]
    NotAnInteger { field: &'static str, value: String },

    #[error("action `{action}` requires field `{field}`")]
    MissingField {
        action: &'static str,
        field: &'static str,
    },
}

/// A referenced room or device does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Kind of thing that was looked up (`"Room"`, `"Device"`).
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}

impl NotFoundError {
    #[must_use]
    pub fn room(room: &RoomId) -> Self {
        Self {
            entity: "Room",
            id: room.to_string(),
        }
    }

    #[must_use]
    pub fn device(room: &RoomId, device: &DeviceKey) -> Self {
        Self {
            entity: "Device",
            id: format!("{room}/{device}"),
        }
    }
}

/// Transport, HTTP, or decoding failure of the remote status API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RemoteError {
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    /// Descriptive message, taken from the server's `error` field when present.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_report_kind_for_each_variant() {
        let validation: HomeError = ValidationError::ChannelOutOfRange(0).into();
        assert_eq!(validation.kind(), ErrorKind::Validation);

        let not_found: HomeError = NotFoundError {
            entity: "Room",
            id: "garage".to_string(),
        }
        .into();
        assert_eq!(not_found.kind(), ErrorKind::NotFound);

        let remote: HomeError = RemoteError {
            status: Some(500),
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(remote.kind(), ErrorKind::Remote);

        let io = std::io::Error::other("disk full");
        let storage = HomeError::Storage(Box::new(io));
        assert_eq!(storage.kind(), ErrorKind::Storage);
    }

    #[test]
    fn should_display_validation_message_transparently() {
        let err: HomeError = ValidationError::TemperatureOutOfRange {
            requested: 40,
            min: 16,
            max: 30,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "temperature must be between 16°C and 30°C, got 40°C"
        );
    }

    #[test]
    fn should_format_device_not_found_with_room_prefix() {
        let room = RoomId::new("sala").unwrap();
        let device = DeviceKey::new("fan").unwrap();
        let err = NotFoundError::device(&room, &device);
        assert_eq!(err.to_string(), "Device not found: sala/fan");
    }

    #[test]
    fn should_serialize_error_kind_as_snake_case() {
        let json = serde_json::to_string(&ErrorKind::NotFound).unwrap();
        assert_eq!(json, "\"not_found\"");
    }
}
