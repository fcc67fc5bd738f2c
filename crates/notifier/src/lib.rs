//! Message delivery for the Courier relay.
//!
//! [`TelegramClient`] talks to the Telegram Bot API; [`Dispatcher`] fans a
//! single message out to many chats through any [`MessageSender`] and
//! aggregates the per-chat failures into a [`DeliveryReport`].

pub mod dispatch;
pub mod error;
pub mod sender;
pub mod telegram;

pub use dispatch::{DeliveryFailure, DeliveryReport, Dispatcher};
pub use error::NotifierError;
pub use sender::{MessageSender, ParseMode};
pub use telegram::TelegramClient;

pub use teloxide::{ApiError, RequestError};
