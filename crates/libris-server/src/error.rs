use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use libris_ops::OpsError;
use libris_store::StoreError;
use libris_types::TypeError;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No bearer token, or one that matches no live session.
    #[error("authentication required: {0}")]
    AuthRequired(String),

    /// Malformed request input (multipart, parameters).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An operations-layer failure.
    #[error(transparent)]
    Ops(#[from] OpsError),

    /// Domain type validation failure (usernames, ids, search fields).
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error (listener setup, config file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// The HTTP status this error maps to.
    ///
    /// Every failure becomes a response at this boundary; nothing is
    /// retried and nothing is fatal to the process.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::AuthRequired(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::Type(_) => StatusCode::BAD_REQUEST,
            Self::Ops(ops) => match ops {
                OpsError::UserExists(_) => StatusCode::CONFLICT,
                OpsError::UserNotFound(_)
                | OpsError::BookNotFound(_)
                | OpsError::NoPdf => StatusCode::NOT_FOUND,
                OpsError::InvalidPassword => StatusCode::UNAUTHORIZED,
                OpsError::PasswordMismatch | OpsError::PdfOnly(_) | OpsError::Type(_) => {
                    StatusCode::BAD_REQUEST
                }
                OpsError::ReadOnlyScope => StatusCode::FORBIDDEN,
                OpsError::Store(StoreError::FileNotFound(_)) => StatusCode::NOT_FOUND,
                OpsError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
