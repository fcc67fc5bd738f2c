use async_trait::async_trait;

use crate::error::NotifierError;

/// Text formatting mode understood by the Bot API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    Html,
}

impl std::fmt::Display for ParseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMode::Markdown => write!(f, "Markdown"),
            ParseMode::MarkdownV2 => write!(f, "MarkdownV2"),
            ParseMode::Html => write!(f, "HTML"),
        }
    }
}

// Upstream marks `Markdown` deprecated in favour of `MarkdownV2`.
#[allow(deprecated)]
impl From<ParseMode> for teloxide::types::ParseMode {
    fn from(mode: ParseMode) -> Self {
        match mode {
            ParseMode::Markdown => teloxide::types::ParseMode::Markdown,
            ParseMode::MarkdownV2 => teloxide::types::ParseMode::MarkdownV2,
            ParseMode::Html => teloxide::types::ParseMode::Html,
        }
    }
}

/// Delivers a single text message to a single chat.
///
/// Implemented by [`crate::TelegramClient`]; tests substitute recording
/// fakes.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: ParseMode,
    ) -> Result<(), NotifierError>;
}
