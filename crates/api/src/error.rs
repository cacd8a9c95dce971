//! Mapping from handler failures to HTTP responses.
//!
//! Response bodies are short stable strings; the underlying cause only ever
//! goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use db::DbError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not a JSON item.
    #[error("malformed request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// The item name was missing or blank.
    #[error("item name must not be empty")]
    InvalidName,

    /// The `{id}` path segment was not an integer; carries the reason.
    #[error("invalid item id: {0}")]
    InvalidId(String),

    #[error("item not found")]
    NotFound,

    #[error("storage failure: {0}")]
    Storage(#[source] DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::InvalidName | Self::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The body sent to the client.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) => "body error",
            Self::InvalidName => "invalid name",
            Self::InvalidId(_) => "invalid id",
            Self::NotFound => "not found",
            Self::Storage(_) => "db error",
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        } else {
            warn!(error = %self, "request rejected");
        }

        (status, self.message()).into_response()
    }
}
