//! Status client port — read-only access to a remote home status server.

use std::future::Future;

use homedash_domain::error::HomeError;
use homedash_domain::remote::{RemoteDevice, RoomDetail, RoomSummary, SystemStatus};

/// Client of the remote status API.
///
/// Every failure (transport, non-2xx status, unreadable body) surfaces as
/// [`HomeError::Remote`] carrying a message fit for display.
pub trait StatusClient {
    /// List every room known to the server.
    fn list_rooms(&self) -> impl Future<Output = Result<Vec<RoomSummary>, HomeError>> + Send;

    /// Fetch one room and its devices.
    fn get_room_detail(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<RoomDetail, HomeError>> + Send;

    /// List devices, optionally restricted to one room.
    fn list_devices(
        &self,
        room: Option<&str>,
    ) -> impl Future<Output = Result<Vec<RemoteDevice>, HomeError>> + Send;

    /// Fetch one device by id.
    fn get_device(&self, id: &str) -> impl Future<Output = Result<RemoteDevice, HomeError>> + Send;

    /// Fetch the whole-system snapshot.
    fn get_system_status(&self) -> impl Future<Output = Result<SystemStatus, HomeError>> + Send;

    /// Send a chat message and return the server's reply untouched.
    fn send_chat_message(
        &self,
        message: &str,
    ) -> impl Future<Output = Result<serde_json::Value, HomeError>> + Send;
}

impl<T: StatusClient + Send + Sync> StatusClient for std::sync::Arc<T> {
    fn list_rooms(&self) -> impl Future<Output = Result<Vec<RoomSummary>, HomeError>> + Send {
        (**self).list_rooms()
    }

    fn get_room_detail(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<RoomDetail, HomeError>> + Send {
        (**self).get_room_detail(name)
    }

    fn list_devices(
        &self,
        room: Option<&str>,
    ) -> impl Future<Output = Result<Vec<RemoteDevice>, HomeError>> + Send {
        (**self).list_devices(room)
    }

    fn get_device(&self, id: &str) -> impl Future<Output = Result<RemoteDevice, HomeError>> + Send {
        (**self).get_device(id)
    }

    fn get_system_status(&self) -> impl Future<Output = Result<SystemStatus, HomeError>> + Send {
        (**self).get_system_status()
    }

    fn send_chat_message(
        &self,
        message: &str,
    ) -> impl Future<Output = Result<serde_json::Value, HomeError>> + Send {
        (**self).send_chat_message(message)
    }
}
