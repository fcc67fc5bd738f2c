use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// A notification to relay to one or more Telegram chats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Optional heading, rendered in bold above the body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Body text, passed to Telegram as Markdown. Missing or null is empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    /// Destination chat IDs, in the order they should be reported. Missing
    /// or null is an empty list.
    #[serde(default, deserialize_with = "null_as_default")]
    pub chats: Vec<i64>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Message {
    /// Decode a request body.
    ///
    /// The content type is not inspected; any syntax or shape error is
    /// reported as [`AppError::Decode`] with the decoder's message.
    pub fn from_json(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(body).map_err(|e| AppError::Decode(e.to_string()))
    }

    /// The title, if one was given and it is not empty.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}
