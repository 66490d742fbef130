use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("no file provided")]
    MissingFile,

    #[error("invalid width or height")]
    InvalidDimensions,

    #[error("image processing failed: {0}")]
    Processing(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<imagefit_imaging::ImagingError> for ServerError {
    fn from(err: imagefit_imaging::ImagingError) -> Self {
        Self::Processing(err.to_string())
    }
}

impl From<imagefit_core::CoreError> for ServerError {
    fn from(err: imagefit_core::CoreError) -> Self {
        Self::Processing(err.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::MissingFile => {
                (StatusCode::BAD_REQUEST, "No file provided".to_string())
            }
            ServerError::InvalidDimensions => (
                StatusCode::BAD_REQUEST,
                "Invalid width or height".to_string(),
            ),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::Processing(cause) => {
                // The caller gets a fixed message; the cause goes to the log
                error!("Error processing image: {}", cause);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process image".to_string(),
                )
            }
            ServerError::Internal(msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));

        (status, body).into_response()
    }
}
