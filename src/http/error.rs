//! Client-facing error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Errors a façade endpoint can answer with.
///
/// Upstream detail is never carried here; handlers log it before mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A required query parameter was missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The provider failed or reported a non-200 code.
    #[error("{operation} failed")]
    Upstream { operation: &'static str },
}

impl ApiError {
    pub fn required(field: &str) -> Self {
        ApiError::Validation(format!("{field} required"))
    }

    pub fn invalid(field: &str) -> Self {
        ApiError::Validation(format!("{field} invalid"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
