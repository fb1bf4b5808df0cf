//! HTTP error mapping

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Result type for request handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors a request can fail with
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error from the store or address/data validation
    #[error(transparent)]
    Core(#[from] sheetapi_core::Error),

    /// Request body was not the expected JSON shape
    #[error("Invalid request body: {0}")]
    Body(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection.body_text())
    }
}

impl ApiError {
    /// The HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        use sheetapi_core::Error;

        match self {
            ApiError::Core(Error::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Core(Error::InvalidAddress(_)) | ApiError::Core(Error::InvalidCellData(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Body(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!("Request failed with {status}: {self}");
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
