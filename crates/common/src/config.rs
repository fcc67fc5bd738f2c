use std::time::Duration;

pub const TOKEN_ENV: &str = "NOTIFIER_BOT_TOKEN";
pub const LISTEN_ADDRESS_ENV: &str = "NOTIFIER_BOT_LISTEN_ADDRESS";
pub const LISTEN_PORT_ENV: &str = "NOTIFIER_BOT_LISTEN_PORT";
pub const GRACEFUL_TIMEOUT_ENV: &str = "NOTIFIER_BOT_TIMEOUT";
pub const VERBOSE_ENV: &str = "NOTIFIER_BOT_VERBOSE";
pub const API_URL_ENV: &str = "NOTIFIER_BOT_API_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "NOTIFIER_BOT_REQUEST_TIMEOUT";

pub const DEFAULT_LISTEN_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_LISTEN_PORT: u16 = 8081;
pub const DEFAULT_GRACEFUL_TIMEOUT: &str = "15s";
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "10s";

/// Relay configuration, loaded from the environment or built from CLI flags.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Telegram bot token
    pub bot_token: String,

    /// Address the HTTP server binds to
    pub listen_address: String,

    /// Port the HTTP server binds to
    pub listen_port: u16,

    /// How long in-flight requests may run after a shutdown signal
    pub graceful_timeout: Duration,

    /// Enable debug logs
    pub verbose: bool,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Per-call timeout for Bot API requests
    pub request_timeout: Duration,

    /// Problems found while loading that fell back to a default. Reported
    /// by [`AppConfig::log_warnings`] once tracing is installed.
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// Load configuration from environment variables with server defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::load(false)
    }

    /// Load configuration for the Lambda function, where debug logging is
    /// on unless `NOTIFIER_BOT_VERBOSE` says otherwise.
    pub fn from_lambda_env() -> anyhow::Result<Self> {
        Self::load(true)
    }

    fn load(verbose_default: bool) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let mut warnings = Vec::new();

        Ok(Self {
            bot_token: std::env::var(TOKEN_ENV)
                .map_err(|_| anyhow::anyhow!("{} environment variable is required", TOKEN_ENV))?,
            listen_address: std::env::var(LISTEN_ADDRESS_ENV)
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDRESS.to_string()),
            listen_port: std::env::var(LISTEN_PORT_ENV)
                .unwrap_or_else(|_| DEFAULT_LISTEN_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("{} must be a valid port", LISTEN_PORT_ENV))?,
            graceful_timeout: parse_duration(
                &std::env::var(GRACEFUL_TIMEOUT_ENV)
                    .unwrap_or_else(|_| DEFAULT_GRACEFUL_TIMEOUT.to_string()),
            )
            .map_err(|e| anyhow::anyhow!("{}: {}", GRACEFUL_TIMEOUT_ENV, e))?,
            verbose: match std::env::var(VERBOSE_ENV) {
                Ok(raw) => parse_bool(&raw).unwrap_or_else(|| {
                    warnings.push(format!(
                        "Incorrect value for {}: {}. Defaulting to false",
                        VERBOSE_ENV, raw
                    ));
                    false
                }),
                Err(_) => verbose_default,
            },
            telegram_api_url: std::env::var(API_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            request_timeout: parse_duration(
                &std::env::var(REQUEST_TIMEOUT_ENV)
                    .unwrap_or_else(|_| DEFAULT_REQUEST_TIMEOUT.to_string()),
            )
            .map_err(|e| anyhow::anyhow!("{}: {}", REQUEST_TIMEOUT_ENV, e))?,
            warnings,
        })
    }

    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!("{}", warning);
        }
    }

    /// `address:port` string for binding the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_address, self.listen_port)
    }
}

/// Parse a boolean the way `1`, `t`, `true`, `0`, `f`, `false` (any case)
/// are usually accepted from the environment.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

/// Parse a duration such as `15s`, `500ms`, `1m30s` or `2h`.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total = Duration::ZERO;
    let mut rest = raw;

    while !rest.is_empty() {
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| format!("missing unit in duration {:?}", raw))?;
        if digits == 0 {
            return Err(format!("invalid duration {:?}", raw));
        }
        let value: u64 = rest[..digits]
            .parse()
            .map_err(|_| format!("invalid duration {:?}", raw))?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(rest.len());
        let step = match &rest[..unit_len] {
            "ms" => Duration::from_millis(value),
            "s" => Duration::from_secs(value),
            "m" => Duration::from_secs(
                value
                    .checked_mul(60)
                    .ok_or_else(|| format!("duration {:?} overflows", raw))?,
            ),
            "h" => Duration::from_secs(
                value
                    .checked_mul(3600)
                    .ok_or_else(|| format!("duration {:?} overflows", raw))?,
            ),
            unit => return Err(format!("unknown unit {:?} in duration {:?}", unit, raw)),
        };
        total = total
            .checked_add(step)
            .ok_or_else(|| format!("duration {:?} overflows", raw))?;
        rest = &rest[unit_len..];
    }

    Ok(total)
}
