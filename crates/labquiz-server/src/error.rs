//! Handler-level errors.
//!
//! Every failure becomes a JSON body; nothing escapes as a bare 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use labquiz_core::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was missing or not the expected JSON.
    #[error("{0}")]
    BadRequest(String),

    /// The marker store could not be written or listed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(StoreError::InvalidKey { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Storage(StoreError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("rejected request: {self}");
        }
        // Same shape for every endpoint: validate callers read `correct`, the rest `success`.
        let body = json!({
            "success": false,
            "correct": false,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
