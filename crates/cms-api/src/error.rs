//! Error types for cms-api and their HTTP mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias for cms-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cms-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the core, store, or service layers
    #[error(transparent)]
    Core(#[from] cms_core::Error),

    /// Request could not be parsed (malformed JSON, path, or query string)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// I/O error while binding or serving
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::Core(cms_core::Error::ContactNotFound { .. }) => StatusCode::NOT_FOUND,
            Error::Core(cms_core::Error::Validation { .. }) => StatusCode::BAD_REQUEST,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Core(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable category for the response body.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Core(cms_core::Error::ContactNotFound { .. }) => "not_found",
            Error::Core(cms_core::Error::Validation { .. }) => "validation",
            Error::BadRequest(_) => "bad_request",
            Error::Core(_) | Error::Io(_) => "internal",
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let category = self.category();

        // Server-side details stay in the log.
        let (message, field) = match &self {
            Error::Core(cms_core::Error::Validation { field, message }) => {
                (message.clone(), field.clone())
            }
            _ if status.is_server_error() => {
                tracing::error!(error = %self, "Request failed");
                ("internal server error".to_string(), None)
            }
            other => (other.to_string(), None),
        };

        if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), category, message = %message, "Request rejected");
        }

        let mut error = serde_json::json!({
            "category": category,
            "message": message,
        });
        if let Some(field) = field {
            error["field"] = serde_json::Value::String(field);
        }

        (status, Json(serde_json::json!({ "error": error }))).into_response()
    }
}
