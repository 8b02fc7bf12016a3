//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homedash_domain::error::HomeError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HomeError`] to an HTTP response with appropriate status code.
pub struct ApiError(HomeError);

impl From<HomeError> for ApiError {
    fn from(err: HomeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HomeError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HomeError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            HomeError::Remote(err) => {
                tracing::warn!(error = %err, status = ?err.status, "remote status server failed");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            HomeError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_domain::error::{NotFoundError, RemoteError, ValidationError};
    use homedash_domain::id::RoomId;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_map_validation_to_bad_request() {
        let response = ApiError::from(HomeError::from(ValidationError::ChannelOutOfRange(0)))
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_of(response).await["error"], "invalid channel 0 (1-999)");
    }

    #[tokio::test]
    async fn should_map_not_found_to_404() {
        let room = RoomId::new("garaje").unwrap();
        let response = ApiError::from(HomeError::from(NotFoundError::room(&room))).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_map_remote_to_bad_gateway_with_message() {
        let err = RemoteError {
            status: Some(500),
            message: "backend down".to_string(),
        };
        let response = ApiError::from(HomeError::from(err)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_of(response).await["error"], "backend down");
    }

    #[tokio::test]
    async fn should_hide_storage_details() {
        let response =
            ApiError::from(HomeError::Storage("disk full at /var/lib".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_of(response).await["error"], "internal server error");
    }
}
