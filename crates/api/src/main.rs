//! Courier API server binary entrypoint.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use courier_common::config::AppConfig;
use courier_common::telemetry::init_tracing;
use courier_notifier::{Dispatcher, TelegramClient};

use courier_api::cli::{Cli, Command};
use courier_api::routes::create_router;
use courier_api::server::{apply_layers, serve_with_shutdown, shutdown_signal};
use courier_api::state::AppState;

/// Upper bound on handling a single request, matching the server's
/// read/write timeouts.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Command::Start(args) => run(args.into_config()).await,
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    init_tracing(config.verbose);

    tracing::info!("Starting Courier API server...");

    // Validate the token before accepting traffic
    let client = TelegramClient::connect(
        &config.bot_token,
        &config.telegram_api_url,
        config.request_timeout,
    )
    .await
    .map_err(|e| anyhow::anyhow!("error when initializing Telegram client: {}", e))?;

    let state = AppState::new(Dispatcher::new(Arc::new(client)));

    let app = apply_layers(create_router(state), REQUEST_TIMEOUT);
    tracing::debug!("Router setup complete");

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("error when listening at {} -> {}", addr, e))?;
    tracing::info!("Start listening on {}", addr);

    serve_with_shutdown(listener, app, shutdown_signal(), config.graceful_timeout)
        .await
        .map_err(|e| anyhow::anyhow!("error when serving at {} -> {}", addr, e))?;

    Ok(())
}
