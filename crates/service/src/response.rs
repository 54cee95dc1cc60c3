//! Uniform `{code, message, body}` envelope returned by every roster operation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::ServiceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, body: T) -> Self {
        Self { code: 200, message: message.into(), body: Some(body) }
    }

    pub fn fail(code: u16, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), body: None }
    }

    pub fn server_error() -> Self {
        Self::fail(500, "server error")
    }
}

impl<T> From<ServiceError> for ApiResponse<T> {
    fn from(e: ServiceError) -> Self {
        if e.code() == 500 {
            error!(error = %e, "roster operation failed");
        }
        Self::fail(e.code(), e.client_message())
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
