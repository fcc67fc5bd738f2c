//! Command-line interface for the server binary.
//!
//! Every flag can also be supplied through its `NOTIFIER_BOT_*` environment
//! variable.

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};

use courier_common::config::{
    API_URL_ENV, AppConfig, DEFAULT_API_URL, DEFAULT_GRACEFUL_TIMEOUT, DEFAULT_LISTEN_ADDRESS,
    DEFAULT_LISTEN_PORT, DEFAULT_REQUEST_TIMEOUT, GRACEFUL_TIMEOUT_ENV, LISTEN_ADDRESS_ENV,
    LISTEN_PORT_ENV, REQUEST_TIMEOUT_ENV, TOKEN_ENV, VERBOSE_ENV, parse_bool, parse_duration,
};

#[derive(Debug, Parser)]
#[command(
    name = "courier-api",
    version,
    about = "Telegram Notifier Bot",
    long_about = "courier-api - Telegram bot that relays notifications to a set of chats"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the server and listen for connections
    Start(StartArgs),
}

#[derive(Debug, Clone, Args)]
pub struct StartArgs {
    /// Bot listen address
    #[arg(short = 'a', long, value_name = "ADDRESS", env = LISTEN_ADDRESS_ENV, default_value = DEFAULT_LISTEN_ADDRESS)]
    pub address: String,

    /// Bot listen port
    #[arg(short = 'p', long, value_name = "PORT", env = LISTEN_PORT_ENV, default_value_t = DEFAULT_LISTEN_PORT)]
    pub port: u16,

    /// The Telegram token to talk to the API
    #[arg(short = 'k', long, value_name = "TOKEN", env = TOKEN_ENV, hide_env_values = true)]
    pub token: String,

    /// How long the server waits for existing connections to finish, e.g. 15s or 1m
    #[arg(
        short = 't',
        long = "graceful-timeout",
        visible_alias = "timeout",
        value_name = "DURATION",
        env = GRACEFUL_TIMEOUT_ENV,
        default_value = DEFAULT_GRACEFUL_TIMEOUT,
        value_parser = parse_duration
    )]
    pub graceful_timeout: Duration,

    /// Enable debug logs. Accepts 1, t, true, 0, f or false in any case
    #[arg(
        short = 'v',
        long,
        value_name = "BOOL",
        env = VERBOSE_ENV,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = parse_verbose
    )]
    pub verbose: bool,

    /// Telegram Bot API base URL
    #[arg(long, value_name = "URL", env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Timeout for each Bot API call
    #[arg(
        long,
        value_name = "DURATION",
        env = REQUEST_TIMEOUT_ENV,
        default_value = DEFAULT_REQUEST_TIMEOUT,
        value_parser = parse_duration
    )]
    pub request_timeout: Duration,
}

fn parse_verbose(raw: &str) -> Result<bool, String> {
    parse_bool(raw).ok_or_else(|| format!("invalid boolean {:?}", raw))
}

impl StartArgs {
    pub fn into_config(self) -> AppConfig {
        AppConfig {
            bot_token: self.token,
            listen_address: self.address,
            listen_port: self.port,
            graceful_timeout: self.graceful_timeout,
            verbose: self.verbose,
            telegram_api_url: self.api_url,
            request_timeout: self.request_timeout,
            warnings: Vec::new(),
        }
    }
}
