//! Client-specific error type wrapping reqwest errors.

use homedash_domain::error::{HomeError, RemoteError};

/// Errors originating from the remote status client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP client could not be created.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The request never got an answer (connection refused, timeout, …).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The body of a 2xx answer could not be decoded.
    #[error("invalid response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// HTTP status of the answer, when there was one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Build(_) | Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

impl From<ClientError> for HomeError {
    fn from(err: ClientError) -> Self {
        Self::Remote(RemoteError {
            status: err.status(),
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_status_and_message_when_converted() {
        let err = ClientError::Status {
            status: 404,
            message: "Room not found".to_string(),
        };
        let HomeError::Remote(remote) = HomeError::from(err) else {
            panic!("expected a remote error");
        };
        assert_eq!(remote.status, Some(404));
        assert_eq!(remote.message, "Room not found");
    }
}
