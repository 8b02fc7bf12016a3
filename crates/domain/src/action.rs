//! Actions and the reducer that applies them.
//!
//! [`reduce`] is a pure function of `(state, action)`: it either returns the
//! next state plus a description of the change, or rejects the action and
//! leaves the input untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::device::{Device, DeviceKind, FanSpeed};
use crate::error::{HomeError, ValidationError};
use crate::home::HomeState;
use crate::id::{DeviceKey, RoomId};
use crate::room::Room;

/// A validated request to change the home state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HomeAction {
    /// Flip a light. `device_id` defaults to `"light"`.
    ToggleLight {
        room: RoomId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        device_id: Option<DeviceKey>,
    },
    ToggleFan {
        room: RoomId,
    },
    SetFanSpeed {
        room: RoomId,
        speed: FanSpeed,
    },
    ToggleTv {
        room: RoomId,
    },
    SetTvChannel {
        room: RoomId,
        channel: u32,
    },
    SetTemperature {
        room: RoomId,
        temperature: i32,
    },
    ToggleOven {
        room: RoomId,
    },
    /// Replace everything with the factory configuration.
    ResetHome,
}

impl HomeAction {
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::ToggleLight { .. } => ActionKind::ToggleLight,
            Self::ToggleFan { .. } => ActionKind::ToggleFan,
            Self::SetFanSpeed { .. } => ActionKind::SetFanSpeed,
            Self::ToggleTv { .. } => ActionKind::ToggleTv,
            Self::SetTvChannel { .. } => ActionKind::SetTvChannel,
            Self::SetTemperature { .. } => ActionKind::SetTemperature,
            Self::ToggleOven { .. } => ActionKind::ToggleOven,
            Self::ResetHome => ActionKind::ResetHome,
        }
    }

    /// Room targeted by the action, if any.
    #[must_use]
    pub fn room(&self) -> Option<&RoomId> {
        match self {
            Self::ToggleLight { room, .. }
            | Self::ToggleFan { room }
            | Self::SetFanSpeed { room, .. }
            | Self::ToggleTv { room }
            | Self::SetTvChannel { room, .. }
            | Self::SetTemperature { room, .. }
            | Self::ToggleOven { room } => Some(room),
            Self::ResetHome => None,
        }
    }
}

/// Discriminant of a [`HomeAction`], also the `type` tag of an [`ActionRequest`].
///
/// The upper-case aliases match action names persisted by older dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    #[serde(alias = "TOGGLE_LIGHT")]
    ToggleLight,
    #[serde(alias = "TOGGLE_FAN")]
    ToggleFan,
    #[serde(alias = "SET_FAN_SPEED")]
    SetFanSpeed,
    #[serde(alias = "TOGGLE_TV")]
    ToggleTv,
    #[serde(alias = "SET_TV_CHANNEL")]
    SetTvChannel,
    #[serde(alias = "SET_TEMPERATURE")]
    SetTemperature,
    #[serde(alias = "TOGGLE_OVEN")]
    ToggleOven,
    #[serde(alias = "RESET_HOME")]
    ResetHome,
}

impl ActionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToggleLight => "toggle_light",
            Self::ToggleFan => "toggle_fan",
            Self::SetFanSpeed => "set_fan_speed",
            Self::ToggleTv => "toggle_tv",
            Self::SetTvChannel => "set_tv_channel",
            Self::SetTemperature => "set_temperature",
            Self::ToggleOven => "toggle_oven",
            Self::ResetHome => "reset_home",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untyped action as received from a client.
///
/// Every field but `type` is optional here; [`HomeAction::try_from`] checks
/// that the fields required by the action are present and well-formed.
/// Numbers are kept as raw JSON numbers so that a negative, fractional or
/// oversized value is rejected as a validation error rather than at decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub speed: Option<String>,
    #[serde(default)]
    pub channel: Option<Number>,
    #[serde(default)]
    pub temperature: Option<Number>,
}

impl ActionRequest {
    /// A request of `kind` with every optional field empty.
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            room: None,
            device_id: None,
            speed: None,
            channel: None,
            temperature: None,
        }
    }

    #[must_use]
    pub fn room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    #[must_use]
    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    #[must_use]
    pub fn speed(mut self, speed: impl Into<String>) -> Self {
        self.speed = Some(speed.into());
        self
    }

    #[must_use]
    pub fn channel(mut self, channel: impl Into<Number>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: impl Into<Number>) -> Self {
        self.temperature = Some(temperature.into());
        self
    }

    fn required<T>(&self, field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
        value.ok_or(ValidationError::MissingField {
            action: self.kind.as_str(),
            field,
        })
    }

    fn room_id(&self) -> Result<RoomId, ValidationError> {
        RoomId::new(self.required("room", self.room.clone())?)
    }

    fn channel_value(&self) -> Result<u32, ValidationError> {
        let number = self.required("channel", self.channel.as_ref())?;
        let channel = whole_number("channel", number)?;
        u32::try_from(channel).map_err(|_| ValidationError::ChannelOutOfRange(channel))
    }

    fn temperature_value(&self) -> Result<i32, ValidationError> {
        let number = self.required("temperature", self.temperature.as_ref())?;
        i32::try_from(whole_number("temperature", number)?).map_err(|_| {
            ValidationError::NotAnInteger {
                field: "temperature",
                value: number.to_string(),
            }
        })
    }
}

fn whole_number(field: &'static str, number: &Number) -> Result<i64, ValidationError> {
    number.as_i64().ok_or_else(|| ValidationError::NotAnInteger {
        field,
        value: number.to_string(),
    })
}

impl TryFrom<ActionRequest> for HomeAction {
    type Error = ValidationError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        let action = match request.kind {
            ActionKind::ToggleLight => Self::ToggleLight {
                room: request.room_id()?,
                device_id: request.device_id.clone().map(DeviceKey::new).transpose()?,
            },
            ActionKind::ToggleFan => Self::ToggleFan {
                room: request.room_id()?,
            },
            ActionKind::SetFanSpeed => Self::SetFanSpeed {
                room: request.room_id()?,
                speed: request
                    .required("speed", request.speed.as_deref())?
                    .parse()?,
            },
            ActionKind::ToggleTv => Self::ToggleTv {
                room: request.room_id()?,
            },
            ActionKind::SetTvChannel => Self::SetTvChannel {
                room: request.room_id()?,
                channel: request.channel_value()?,
            },
            ActionKind::SetTemperature => Self::SetTemperature {
                room: request.room_id()?,
                temperature: request.temperature_value()?,
            },
            ActionKind::ToggleOven => Self::ToggleOven {
                room: request.room_id()?,
            },
            ActionKind::ResetHome => Self::ResetHome,
        };
        Ok(action)
    }
}

/// Outcome of a successful [`reduce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The next state.
    pub state: HomeState,
    /// Human-readable description of the new device state.
    pub message: String,
}

/// Apply `action` to `state`.
///
/// # Errors
///
/// Returns [`HomeError::NotFound`] for an unknown room or device,
/// [`HomeError::Validation`] for a device of the wrong type or a value out
/// of range. `state` is never modified.
pub fn reduce(state: &HomeState, action: &HomeAction) -> Result<Transition, HomeError> {
    match action {
        HomeAction::ToggleLight { room, device_id } => {
            let key = device_id
                .clone()
                .unwrap_or_else(|| DeviceKind::Light.default_key());
            let target = Target::resolve(state, room, key)?;
            let light = target.pick(DeviceKind::Light, Device::as_light)?.toggled();
            let message = format!("Light in {}: {}", target.name(), on_off(light.is_on));
            Ok(target.replace(Device::Light(light), message))
        }
        HomeAction::ToggleFan { room } => {
            let target = Target::resolve(state, room, DeviceKind::Fan.default_key())?;
            let fan = target.pick(DeviceKind::Fan, Device::as_fan)?.toggled();
            let message = if fan.is_on {
                format!("Fan in {}: on ({})", target.name(), fan.speed)
            } else {
                format!("Fan in {}: off", target.name())
            };
            Ok(target.replace(Device::Fan(fan), message))
        }
        HomeAction::SetFanSpeed { room, speed } => {
            let target = Target::resolve(state, room, DeviceKind::Fan.default_key())?;
            let fan = target
                .pick(DeviceKind::Fan, Device::as_fan)?
                .with_speed(*speed);
            let message = if fan.is_on {
                format!("Fan in {}: speed {}", target.name(), fan.speed)
            } else {
                format!("Fan in {}: off", target.name())
            };
            Ok(target.replace(Device::Fan(fan), message))
        }
        HomeAction::ToggleTv { room } => {
            let target = Target::resolve(state, room, DeviceKind::Tv.default_key())?;
            let tv = target.pick(DeviceKind::Tv, Device::as_tv)?.toggled();
            let message = if tv.is_on {
                format!("TV in {}: on (channel {})", target.name(), tv.channel)
            } else {
                format!("TV in {}: off", target.name())
            };
            Ok(target.replace(Device::Tv(tv), message))
        }
        HomeAction::SetTvChannel { room, channel } => {
            let target = Target::resolve(state, room, DeviceKind::Tv.default_key())?;
            let tv = target
                .pick(DeviceKind::Tv, Device::as_tv)?
                .with_channel(*channel)?;
            let message = format!("TV in {}: channel {}", target.name(), tv.channel);
            Ok(target.replace(Device::Tv(tv), message))
        }
        HomeAction::SetTemperature { room, temperature } => {
            let target = Target::resolve(state, room, DeviceKind::Thermostat.default_key())?;
            let thermostat = target
                .pick(DeviceKind::Thermostat, Device::as_thermostat)?
                .with_temperature(*temperature)?;
            let message = format!(
                "Thermostat in {}: {}°C",
                target.name(),
                thermostat.temperature
            );
            Ok(target.replace(Device::Thermostat(thermostat), message))
        }
        HomeAction::ToggleOven { room } => {
            let target = Target::resolve(state, room, DeviceKind::Oven.default_key())?;
            let oven = target.pick(DeviceKind::Oven, Device::as_oven)?.toggled();
            let message = if oven.is_on {
                format!("Oven in {}: on ({}°C)", target.name(), oven.temperature)
            } else {
                format!("Oven in {}: off", target.name())
            };
            Ok(target.replace(Device::Oven(oven), message))
        }
        HomeAction::ResetHome => Ok(Transition {
            state: HomeState::default(),
            message: "Home reset to defaults".to_string(),
        }),
    }
}

fn on_off(is_on: bool) -> &'static str {
    if is_on { "on" } else { "off" }
}

/// A device slot inside a room of a given state.
struct Target<'a> {
    state: &'a HomeState,
    id: &'a RoomId,
    room: &'a Room,
    key: DeviceKey,
}

impl<'a> Target<'a> {
    fn resolve(state: &'a HomeState, id: &'a RoomId, key: DeviceKey) -> Result<Self, HomeError> {
        let room = state.room(id)?;
        Ok(Self {
            state,
            id,
            room,
            key,
        })
    }

    fn name(&self) -> &str {
        &self.room.name
    }

    fn pick<T>(
        &self,
        expected: DeviceKind,
        extract: impl FnOnce(&Device) -> Option<T>,
    ) -> Result<T, HomeError> {
        self.room.device_as(self.id, &self.key, expected, extract)
    }

    fn replace(self, device: Device, message: String) -> Transition {
        let room = self.room.with_device(self.key, device);
        Transition {
            state: self.state.with_room(self.id.clone(), room),
            message,
        }
    }
}
