//! Notification relay route.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;

use courier_common::error::AppError;
use courier_common::types::Message;

use super::API_VERSION;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        &format!("{}/notifications", API_VERSION),
        post(send_notification),
    )
}

/// POST /v1/notifications — Send a message to every chat in the body.
///
/// The body is decoded by hand rather than through `Json` so that any
/// malformed payload is a 400 regardless of content type.
async fn send_notification(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let message = Message::from_json(&body)?;

    let report = state.dispatcher.send_message(&message).await;

    if !report.is_success() {
        tracing::debug!(
            failed = report.failures.len(),
            "Returning errors back to the caller"
        );
    }
    report.into_result()?;

    Ok(StatusCode::OK)
}
