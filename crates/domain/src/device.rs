//! Device — a controllable thing of one fixed type living in a room.
//!
//! Every device variant is a small `Copy` value. Mutations never happen in
//! place: helpers such as [`Fan::with_speed`] return the next value and leave
//! the receiver untouched.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{DeviceKey, RoomId};

/// The closed set of device types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Light,
    Fan,
    Tv,
    Thermostat,
    Oven,
}

impl DeviceKind {
    /// Wire name of the kind, as used in the `type` tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Fan => "fan",
            Self::Tv => "tv",
            Self::Thermostat => "thermostat",
            Self::Oven => "oven",
        }
    }

    /// Key under which a room stores its single device of this kind.
    #[must_use]
    pub fn default_key(self) -> DeviceKey {
        DeviceKey::from_static(self.as_str())
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fan speed. `Off` is the only speed a powered-down fan may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FanSpeed {
    #[default]
    #[serde(rename = "off")]
    Off,
    #[serde(rename = "baja", alias = "low")]
    Low,
    #[serde(rename = "media", alias = "medium")]
    Medium,
    #[serde(rename = "alta", alias = "high")]
    High,
}

impl FanSpeed {
    /// All valid speeds, slowest first.
    pub const ALL: [Self; 4] = [Self::Off, Self::Low, Self::Medium, Self::High];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Low => "baja",
            Self::Medium => "media",
            Self::High => "alta",
        }
    }
}

impl fmt::Display for FanSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanSpeed {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "baja" | "low" => Ok(Self::Low),
            "media" | "medium" => Ok(Self::Medium),
            "alta" | "high" => Ok(Self::High),
            _ => Err(ValidationError::InvalidFanSpeed(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Light {
    pub is_on: bool,
}

impl Light {
    #[must_use]
    pub fn toggled(self) -> Self {
        Self { is_on: !self.is_on }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fan {
    pub is_on: bool,
    pub speed: FanSpeed,
}

impl Fan {
    /// Flip power. Turning on starts at [`FanSpeed::Medium`].
    #[must_use]
    pub fn toggled(self) -> Self {
        if self.is_on {
            Self::default()
        } else {
            Self {
                is_on: true,
                speed: FanSpeed::Medium,
            }
        }
    }

    /// Set the speed; power follows (`Off` powers down, anything else powers up).
    #[must_use]
    pub fn with_speed(self, speed: FanSpeed) -> Self {
        Self {
            is_on: speed != FanSpeed::Off,
            speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tv {
    pub is_on: bool,
    pub channel: u32,
}

impl Default for Tv {
    fn default() -> Self {
        Self {
            is_on: false,
            channel: Self::MIN_CHANNEL,
        }
    }
}

impl Tv {
    pub const MIN_CHANNEL: u32 = 1;
    pub const MAX_CHANNEL: u32 = 999;

    #[must_use]
    pub fn toggled(self) -> Self {
        Self {
            is_on: !self.is_on,
            ..self
        }
    }

    /// Tune to `channel`, whatever the power state.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ChannelOutOfRange`] outside `1..=999`.
    pub fn with_channel(self, channel: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN_CHANNEL..=Self::MAX_CHANNEL).contains(&channel) {
            return Err(ValidationError::ChannelOutOfRange(channel.into()));
        }
        Ok(Self { channel, ..self })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thermostat {
    pub temperature: i32,
    pub min_temp: i32,
    pub max_temp: i32,
}

impl Thermostat {
    /// Set the target temperature.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TemperatureOutOfRange`] outside
    /// `min_temp..=max_temp`.
    pub fn with_temperature(self, temperature: i32) -> Result<Self, ValidationError> {
        if !(self.min_temp..=self.max_temp).contains(&temperature) {
            return Err(ValidationError::TemperatureOutOfRange {
                requested: temperature,
                min: self.min_temp,
                max: self.max_temp,
            });
        }
        Ok(Self {
            temperature,
            ..self
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Oven {
    pub is_on: bool,
    pub temperature: i32,
}

impl Oven {
    #[must_use]
    pub fn toggled(self) -> Self {
        Self {
            is_on: !self.is_on,
            ..self
        }
    }
}

/// A device together with its type-specific state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Device {
    Light(Light),
    Fan(Fan),
    Tv(Tv),
    Thermostat(Thermostat),
    Oven(Oven),
}

impl Device {
    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        match self {
            Self::Light(_) => DeviceKind::Light,
            Self::Fan(_) => DeviceKind::Fan,
            Self::Tv(_) => DeviceKind::Tv,
            Self::Thermostat(_) => DeviceKind::Thermostat,
            Self::Oven(_) => DeviceKind::Oven,
        }
    }

    #[must_use]
    pub fn as_light(&self) -> Option<Light> {
        match self {
            Self::Light(light) => Some(*light),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_fan(&self) -> Option<Fan> {
        match self {
            Self::Fan(fan) => Some(*fan),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tv(&self) -> Option<Tv> {
        match self {
            Self::Tv(tv) => Some(*tv),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_thermostat(&self) -> Option<Thermostat> {
        match self {
            Self::Thermostat(thermostat) => Some(*thermostat),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_oven(&self) -> Option<Oven> {
        match self {
            Self::Oven(oven) => Some(*oven),
            _ => None,
        }
    }

    /// Whether the device is currently powered on. Thermostats are never active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Light(light) => light.is_on,
            Self::Fan(fan) => fan.is_on,
            Self::Tv(tv) => tv.is_on,
            Self::Oven(oven) => oven.is_on,
            Self::Thermostat(_) => false,
        }
    }

    /// Check the per-type invariants of a device stored at `room/key`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self, room: &RoomId, key: &DeviceKey) -> Result<(), ValidationError> {
        match self {
            Self::Light(_) | Self::Oven(_) => Ok(()),
            Self::Fan(fan) => {
                if fan.is_on == (fan.speed == FanSpeed::Off) {
                    return Err(ValidationError::InconsistentFan {
                        room: room.clone(),
                        device: key.clone(),
                        is_on: fan.is_on,
                        speed: fan.speed.to_string(),
                    });
                }
                Ok(())
            }
            Self::Tv(tv) => tv.with_channel(tv.channel).map(|_| ()),
            Self::Thermostat(thermostat) => {
                if thermostat.min_temp > thermostat.max_temp {
                    return Err(ValidationError::InvertedThermostatBounds {
                        min: thermostat.min_temp,
                        max: thermostat.max_temp,
                    });
                }
                thermostat
                    .with_temperature(thermostat.temperature)
                    .map(|_| ())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> (RoomId, DeviceKey) {
        (
            RoomId::new("dormitorio").unwrap(),
            DeviceKey::new("fan").unwrap(),
        )
    }

    #[test]
    fn should_start_fan_at_medium_when_toggled_on() {
        let fan = Fan::default().toggled();
        assert!(fan.is_on);
        assert_eq!(fan.speed, FanSpeed::Medium);
    }

    #[test]
    fn should_reset_speed_when_fan_toggled_off() {
        let fan = Fan::default().with_speed(FanSpeed::High).toggled();
        assert_eq!(fan, Fan::default());
    }

    #[test]
    fn should_power_fan_from_speed() {
        for speed in FanSpeed::ALL {
            let fan = Fan::default().with_speed(speed);
            assert_eq!(fan.speed, speed);
            assert_eq!(fan.is_on, speed != FanSpeed::Off);
        }
    }

    #[test]
    fn should_parse_spanish_and_english_speed_names() {
        assert_eq!("media".parse::<FanSpeed>().unwrap(), FanSpeed::Medium);
        assert_eq!("HIGH".parse::<FanSpeed>().unwrap(), FanSpeed::High);
        assert_eq!("low".parse::<FanSpeed>().unwrap(), FanSpeed::Low);
        assert!(matches!(
            "turbo".parse::<FanSpeed>(),
            Err(ValidationError::InvalidFanSpeed(s)) if s == "turbo"
        ));
    }

    #[test]
    fn should_accept_channel_bounds_and_reject_outside() {
        let tv = Tv::default();
        assert_eq!(tv.with_channel(1).unwrap().channel, 1);
        assert_eq!(tv.with_channel(999).unwrap().channel, 999);
        assert_eq!(
            tv.with_channel(0),
            Err(ValidationError::ChannelOutOfRange(0))
        );
        assert_eq!(
            tv.with_channel(1000),
            Err(ValidationError::ChannelOutOfRange(1000))
        );
    }

    #[test]
    fn should_change_channel_while_tv_is_off() {
        let tv = Tv::default().with_channel(42).unwrap();
        assert!(!tv.is_on);
        assert_eq!(tv.channel, 42);
    }

    #[test]
    fn should_keep_bounds_when_temperature_changes() {
        let thermostat = Thermostat {
            temperature: 22,
            min_temp: 16,
            max_temp: 30,
        };
        let next = thermostat.with_temperature(16).unwrap();
        assert_eq!(next.temperature, 16);
        assert_eq!(next.min_temp, 16);
        assert_eq!(next.max_temp, 30);
        assert!(thermostat.with_temperature(31).is_err());
        assert!(thermostat.with_temperature(15).is_err());
    }

    #[test]
    fn should_serialize_with_type_tag_and_camel_case_fields() {
        let device = Device::Thermostat(Thermostat {
            temperature: 22,
            min_temp: 16,
            max_temp: 30,
        });
        let json = serde_json::to_value(device).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "thermostat",
                "temperature": 22,
                "minTemp": 16,
                "maxTemp": 30
            })
        );
    }

    #[test]
    fn should_deserialize_fan_with_spanish_speed() {
        let json = serde_json::json!({"type": "fan", "isOn": true, "speed": "alta"});
        let device: Device = serde_json::from_value(json).unwrap();
        assert_eq!(
            device,
            Device::Fan(Fan {
                is_on: true,
                speed: FanSpeed::High
            })
        );
    }

    #[test]
    fn should_flag_fan_running_at_speed_off() {
        let (room, key) = at();
        let device = Device::Fan(Fan {
            is_on: true,
            speed: FanSpeed::Off,
        });
        assert!(matches!(
            device.validate(&room, &key),
            Err(ValidationError::InconsistentFan { .. })
        ));
    }

    #[test]
    fn should_flag_inverted_thermostat_bounds() {
        let (room, key) = at();
        let device = Device::Thermostat(Thermostat {
            temperature: 20,
            min_temp: 30,
            max_temp: 16,
        });
        assert!(matches!(
            device.validate(&room, &key),
            Err(ValidationError::InvertedThermostatBounds { .. })
        ));
    }

    #[test]
    fn should_never_count_thermostat_as_active() {
        let device = Device::Thermostat(Thermostat {
            temperature: 20,
            min_temp: 16,
            max_temp: 30,
        });
        assert!(!device.is_active());
        assert!(Device::Oven(Oven {
            is_on: true,
            temperature: 180
        })
        .is_active());
    }
}
