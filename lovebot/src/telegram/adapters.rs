//! Adapters from Telegram (teloxide) types to core types.

use lovebot_core::{Chat, Message, ToCoreMessage};

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        Message {
            id: self.0.id.to_string(),
            chat: Chat {
                id: self.0.chat.id.0,
            },
            text: self.0.text().map(|s| s.to_string()),
            photo: self.get_photo_ref(),
            reply_to_message_id: self.get_reply_to_message_id(),
            created_at: chrono::Utc::now(),
        }
    }
}

impl<'a> TelegramMessageWrapper<'a> {
    /// Returns the file id of the largest photo size, if the message
    /// carries a photo. Telegram lists sizes ascending; the last one is
    /// the largest.
    fn get_photo_ref(&self) -> Option<String> {
        self.0
            .photo()
            .and_then(|sizes| sizes.last())
            .map(|size| size.file.id.0.clone())
    }

    /// Returns the id of the replied-to message if present.
    fn get_reply_to_message_id(&self) -> Option<String> {
        self.0.reply_to_message().map(|msg| msg.id.to_string())
    }
}
