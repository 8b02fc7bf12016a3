//! Typed identifier newtypes backed by plain strings.
//!
//! Room and device identifiers are the keys used in the persisted state
//! tree (`"sala"`, `"thermostat"`, …), so they stay human-readable.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! define_id {
    ($(#[doc = $doc:expr])* $name:ident, $empty:expr) => {
        $(#[doc = $doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Build an identifier, rejecting blank input.
            ///
            /// # Errors
            ///
            /// Returns a [`ValidationError`] when `value` is empty or only whitespace.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err($empty);
                }
                Ok(Self(value))
            }

            /// Borrow the identifier text.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Build an identifier from a known-good literal.
            pub(crate) fn from_static(value: &'static str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Key of a [`Room`](crate::room::Room) inside the home state (e.g. `"dormitorio"`).
    RoomId,
    ValidationError::EmptyRoomId
);

define_id!(
    /// Key of a [`Device`](crate::device::Device) inside a room (e.g. `"light"`).
    DeviceKey,
    ValidationError::EmptyDeviceKey
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_text_when_valid() {
        let id = RoomId::new("dormitorio").unwrap();
        assert_eq!(id.as_str(), "dormitorio");
        assert_eq!(id.to_string(), "dormitorio");
    }

    #[test]
    fn should_reject_blank_room_id() {
        assert!(matches!(
            RoomId::new("   "),
            Err(ValidationError::EmptyRoomId)
        ));
    }

    #[test]
    fn should_reject_empty_device_key_when_parsing() {
        assert!(matches!(
            DeviceKey::from_str(""),
            Err(ValidationError::EmptyDeviceKey)
        ));
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let key = DeviceKey::new("light").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"light\"");
    }

    #[test]
    fn should_reject_blank_id_when_deserializing() {
        let err = serde_json::from_str::<RoomId>("\"  \"").unwrap_err();
        assert!(err.to_string().contains("room id must not be empty"));
    }

    #[test]
    fn should_accept_non_ascii_room_id() {
        let id: RoomId = "baño".parse().unwrap();
        assert_eq!(id.as_str(), "baño");
    }
}
