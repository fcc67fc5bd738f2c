//! Server lifecycle: serve until a shutdown signal, then drain in-flight
//! requests for at most the graceful timeout.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Wrap `app` with request tracing and a per-request deadline. Requests
/// still running at the deadline get `408 Request Timeout`.
pub fn apply_layers(app: Router, request_timeout: Duration) -> Router {
    app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        request_timeout,
    ))
    .layer(TraceLayer::new_for_http())
}

/// Serve `app` on `listener` until `signal` resolves.
///
/// Returns early with the server's error if it stops on its own. After the
/// signal, connections still open when `grace` runs out are dropped.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    grace: Duration,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send,
{
    let stop = Arc::new(Notify::new());

    let mut server = tokio::spawn({
        let stop = Arc::clone(&stop);
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { stop.notified().await })
                .await
        }
    });

    tokio::select! {
        joined = &mut server => return flatten(joined),
        _ = signal => {}
    }

    tracing::info!("shutting down");
    stop.notify_one();

    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => flatten(joined),
        Err(_) => {
            tracing::warn!(
                grace_secs = grace.as_secs_f64(),
                "Graceful shutdown timed out, dropping open connections"
            );
            server.abort();
            Ok(())
        }
    }
}

fn flatten(joined: Result<io::Result<()>, tokio::task::JoinError>) -> io::Result<()> {
    joined.map_err(io::Error::other)?
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tokio::sync::oneshot;
    use tower::ServiceExt;

    async fn bind() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        (listener, format!("http://{}", addr))
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "late"
            }),
        );
        let app = apply_layers(app, Duration::from_millis(50));

        let response = app
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_fast_request_passes_through_layers() {
        let app = Router::new().route("/ping", get(|| async { "pong" }));
        let app = apply_layers(app, Duration::from_secs(5));

        let response = app
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_serves_until_signal() {
        let (listener, base) = bind().await;
        let app = Router::new().route("/ping", get(|| async { "pong" }));
        let (tx, rx) = oneshot::channel::<()>();

        let server = tokio::spawn(serve_with_shutdown(
            listener,
            app,
            async move {
                rx.await.ok();
            },
            Duration::from_secs(5),
        ));

        let body = reqwest::get(format!("{}/ping", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "pong");

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_grace_period_bounds_shutdown() {
        let (listener, base) = bind().await;
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "late"
            }),
        );
        let (tx, rx) = oneshot::channel::<()>();

        let server = tokio::spawn(serve_with_shutdown(
            listener,
            app,
            async move {
                rx.await.ok();
            },
            Duration::from_millis(200),
        ));

        let request = tokio::spawn(reqwest::get(format!("{}/slow", base)));
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(()).unwrap();

        let finished = tokio::time::timeout(Duration::from_secs(5), server).await;
        assert!(finished.is_ok(), "server did not stop within the grace period");
        request.abort();
    }
}
