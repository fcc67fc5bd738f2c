//! Telegram delivery through `teloxide`.

use std::time::Duration;

use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::Me;

use crate::error::NotifierError;
use crate::sender::{MessageSender, ParseMode};

/// Client for the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramClient {
    bot: Bot,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("api_url", &self.bot.api_url().as_str())
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Build a client without contacting Telegram.
    pub fn new(token: &str, api_url: &str, timeout: Duration) -> Result<Self, NotifierError> {
        if token.trim().is_empty() {
            return Err(NotifierError::Config("bot token is empty".to_string()));
        }

        let api_url = reqwest::Url::parse(api_url)
            .map_err(|e| NotifierError::Config(format!("invalid API URL {:?}: {}", api_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifierError::Config(e.to_string()))?;

        let bot = Bot::with_client(token, http).set_api_url(api_url);

        Ok(Self { bot })
    }

    /// Build a client and validate the token with `getMe`.
    pub async fn connect(
        token: &str,
        api_url: &str,
        timeout: Duration,
    ) -> Result<Self, NotifierError> {
        let client = Self::new(token, api_url, timeout)?;
        let me = client.get_me().await?;

        tracing::info!(
            bot_id = me.user.id.0,
            username = me.user.username.as_deref().unwrap_or(""),
            "Authorized on Telegram bot account"
        );

        Ok(client)
    }

    /// Fetch the bot's own account.
    pub async fn get_me(&self) -> Result<Me, NotifierError> {
        Ok(self.bot.get_me().await?)
    }
}

#[async_trait]
impl MessageSender for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: ParseMode,
    ) -> Result<(), NotifierError> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .parse_mode(parse_mode.into())
            .await?;
        Ok(())
    }
}
