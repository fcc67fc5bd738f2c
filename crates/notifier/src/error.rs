use teloxide::{ApiError, RequestError};
use thiserror::Error;

/// Errors raised while talking to the messaging vendor.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// Telegram rejected the call. Displays the vendor description verbatim.
    #[error("{0}")]
    Api(ApiError),

    /// Any other Bot API failure (network, rate limit, chat migration,
    /// malformed response).
    #[error("{0}")]
    Request(RequestError),

    #[error("Invalid client configuration: {0}")]
    Config(String),

    #[error("Send task for chat {chat_id} aborted: {reason}")]
    TaskFailed { chat_id: i64, reason: String },
}

impl From<RequestError> for NotifierError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Api(api) => NotifierError::Api(api),
            other => NotifierError::Request(other),
        }
    }
}
