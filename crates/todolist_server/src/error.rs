//! HTTP error mapping.
//!
//! Every failure is logged before it is turned into a plain-text response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use todolist_core::StoreError;

#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    /// Worker failure unrelated to the store (panicked task, poisoned lock).
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(
                StoreError::DuplicateKey(_)
                | StoreError::Unavailable(_)
                | StoreError::InvalidData(_),
            )
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(StoreError::NotFound(_)) => "list_not_found",
            Self::Store(StoreError::DuplicateKey(_)) => "duplicate_key",
            Self::Store(StoreError::Unavailable(_)) => "store_unavailable",
            Self::Store(StoreError::InvalidData(_)) => "invalid_data",
            Self::Internal(_) => "internal",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Store(StoreError::NotFound(name)) => format!("List \"{name}\" does not exist."),
            _ => "Error occurred while processing the request.".to_string(),
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Internal(_) => None,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Internal(format!("store task failed: {value}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=request_failed module=http status=error http_status={} error_code={} error={}",
                status.as_u16(),
                self.error_code(),
                self
            );
        } else {
            warn!(
                "event=request_failed module=http status=error http_status={} error_code={} error={}",
                status.as_u16(),
                self.error_code(),
                self
            );
        }
        (status, self.public_message()).into_response()
    }
}
