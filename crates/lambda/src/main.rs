//! AWS Lambda entry point for the Courier relay.
//!
//! Receives API Gateway proxy events carrying the same JSON body as
//! `POST /v1/notifications`.
//!
//! ## Environment Variables
//!
//! - `NOTIFIER_BOT_TOKEN`: Telegram bot token (required)
//! - `NOTIFIER_BOT_VERBOSE`: debug logging (default: `true`)
//! - `NOTIFIER_BOT_API_URL`: Bot API base URL
//! - `NOTIFIER_BOT_REQUEST_TIMEOUT`: timeout for each Bot API call
//! - `RUST_LOG`: overrides the log filter

mod handler;

use std::sync::Arc;

use lambda_runtime::{Error, run, service_fn};

use courier_common::config::AppConfig;
use courier_common::telemetry::init_tracing;
use courier_notifier::{Dispatcher, TelegramClient};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = AppConfig::from_lambda_env()?;
    init_tracing(config.verbose);
    config.log_warnings();

    // Built once per cold start and shared by every invocation
    let client = TelegramClient::connect(
        &config.bot_token,
        &config.telegram_api_url,
        config.request_timeout,
    )
    .await
    .map_err(|e| anyhow::anyhow!("Error when initializing the Telegram Client: {}", e))?;
    let dispatcher = Dispatcher::new(Arc::new(client));

    tracing::info!("Courier Lambda ready");

    run(service_fn(|event| handler::handle(&dispatcher, event))).await
}
