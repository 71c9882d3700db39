//! Error types for mediahost
//!
//! Every handler error renders as `{"error": {"code", "message"}}`.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::UploadError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Upload could not be stored (500)
    ///
    /// Client mistakes (bad metadata, missing file name) and server faults
    /// share this status.
    #[error("{0}")]
    Upload(#[from] UploadError),

    /// Request body is not a readable multipart form
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Upload(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPLOAD_FAILED",
                err.to_string(),
            ),
            ApiError::Multipart(ref err) => (err.status(), "MULTIPART_ERROR", err.body_text()),
            ApiError::Io(ref err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "IO_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let (status, body) = render(ApiError::NotFound("File not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
        assert_eq!(body["error"]["message"], "File not found");
    }

    #[tokio::test]
    async fn test_upload_errors_are_server_errors() {
        let (status, body) = render(UploadError::MissingFilename.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "UPLOAD_FAILED");
        assert_eq!(body["error"]["message"], "Audio file name is missing");
    }

    #[tokio::test]
    async fn test_upload_io_error_carries_text() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "disk says no");
        let (status, body) = render(UploadError::from(io).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "disk says no");
    }
}
