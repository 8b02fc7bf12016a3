//! reqwest implementation of [`StatusClient`].

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use homedash_app::ports::StatusClient;
use homedash_domain::error::HomeError;
use homedash_domain::remote::{
    ChatRequest, DevicesEnvelope, RemoteDevice, RoomDetail, RoomSummary, RoomsEnvelope,
    SystemStatus,
};

use crate::error::ClientError;

/// Connection settings for the remote status server.
///
/// ```
/// use std::time::Duration;
/// use homedash_adapter_http_client::ClientConfig;
///
/// let config = ClientConfig::new("http://192.168.1.20:3000")
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.base_url(), "http://192.168.1.20:3000");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Address of a status server running next to the dashboard.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3000";
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Target `base_url`; a trailing slash is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Creates an [`HttpStatusClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpStatusClient, ClientError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(HttpStatusClient {
            base_url: self.base_url,
            client,
        })
    }
}

/// JSON error body returned by the server on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the remote status server.
#[derive(Debug, Clone)]
pub struct HttpStatusClient {
    base_url: String,
    client: Client,
}

impl HttpStatusClient {
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        decode(url, check_response(response).await?).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        decode(url, check_response(response).await?).await
    }
}

/// Check the HTTP response status and extract an error if non-2xx.
async fn check_response(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {status}"),
    };
    tracing::debug!(status = status.as_u16(), %message, "remote answered with an error");
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(url: String, response: Response) -> Result<T, ClientError> {
    response
        .json()
        .await
        .map_err(|source| ClientError::Decode { url, source })
}

impl StatusClient for HttpStatusClient {
    async fn list_rooms(&self) -> Result<Vec<RoomSummary>, HomeError> {
        let envelope: RoomsEnvelope = self.get_json("/rooms").await?;
        Ok(envelope.rooms)
    }

    async fn get_room_detail(&self, name: &str) -> Result<RoomDetail, HomeError> {
        let path = format!("/rooms/{}", urlencoding::encode(name));
        Ok(self.get_json(&path).await?)
    }

    async fn list_devices(&self, room: Option<&str>) -> Result<Vec<RemoteDevice>, HomeError> {
        let path = match room {
            Some(room) => format!("/devices?room={}", urlencoding::encode(room)),
            None => "/devices".to_string(),
        };
        let envelope: DevicesEnvelope = self.get_json(&path).await?;
        Ok(envelope.devices)
    }

    async fn get_device(&self, id: &str) -> Result<RemoteDevice, HomeError> {
        let path = format!("/devices/{}", urlencoding::encode(id));
        Ok(self.get_json(&path).await?)
    }

    async fn get_system_status(&self) -> Result<SystemStatus, HomeError> {
        Ok(self.get_json("/status").await?)
    }

    async fn send_chat_message(&self, message: &str) -> Result<serde_json::Value, HomeError> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        Ok(self.post_json("/chat", &body).await?)
    }
}
