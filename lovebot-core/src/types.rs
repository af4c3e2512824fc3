//! Core types: chat, inbound message, corpus entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chat identity. Stable for the lifetime of a conversation partner; the
/// authorization registry and the conversation tracker are keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// A single inbound message with optional text, photo attachment, and reply
/// context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub chat: Chat,
    pub text: Option<String>,
    /// Transport reference to the message's photo (largest size), if any.
    /// Resolved to bytes via [`crate::Messenger::fetch_attachment`].
    pub photo: Option<String>,
    /// Id of the message this one replies to; drives reply correlation.
    pub reply_to_message_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Corpus message category: morning texts go out with the daily broadcast,
/// general texts answer `/love`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Morning,
    General,
}

impl MessageCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageCategory::Morning => "morning",
            MessageCategory::General => "general",
        }
    }
}

impl std::fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored corpus text. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusMessage {
    pub id: String,
    pub text: String,
    pub category: MessageCategory,
}

/// A stored corpus image. Immutable after creation; written only by the
/// `/add` conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusImage {
    pub id: String,
    pub content: Vec<u8>,
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}
