use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Common error types used across the relay.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request body could not be decoded into a message.
    #[error("{0}")]
    Decode(String),

    /// One or more destinations rejected the message. Holds the
    /// newline-joined vendor errors.
    #[error("{0}")]
    Delivery(String),
}

impl AppError {
    /// HTTP status reported for this error, shared by the HTTP server and the
    /// Lambda handler.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text response body: the error message plus a trailing newline.
    pub fn body(&self) -> String {
        format!("{}\n", self)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), self.body()).into_response()
    }
}
