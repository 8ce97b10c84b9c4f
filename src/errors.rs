use crate::models::ErrorResponse;
use axum::{Json, http::StatusCode};
use thiserror::Error;

/// Ways a stats lookup can fail. Each maps to one short message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("invalid username format")]
    InvalidUsername,

    #[error("upstream responded with status {status}")]
    FetchFailed { status: u16 },

    #[error("no matching user in response")]
    UserNotFound,

    #[error("request failed: {0}")]
    NetworkOrParse(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidUsername => "InvalidUsername",
            FetchError::FetchFailed { .. } => "FetchFailed",
            FetchError::UserNotFound => "UserNotFound",
            FetchError::NetworkOrParse(_) => "NetworkOrParseError",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::InvalidUsername => "Invalid username format.",
            FetchError::UserNotFound => "No user found.",
            FetchError::FetchFailed { .. } | FetchError::NetworkOrParse(_) => "No data found.",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        let status = match err {
            FetchError::InvalidUsername => StatusCode::BAD_REQUEST,
            FetchError::UserNotFound => StatusCode::NOT_FOUND,
            FetchError::FetchFailed { .. } | FetchError::NetworkOrParse(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        Self {
            status,
            kind: err.kind(),
            message: err.user_message().to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse {
            error: self.kind.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
