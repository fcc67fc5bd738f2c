//! Request logging.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Debug-log the method and path of every request before handling it.
pub async fn log_request(request: Request, next: Next) -> Response {
    tracing::debug!("{} {}", request.method(), request.uri().path());
    next.run(request).await
}
