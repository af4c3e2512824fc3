//! Wraps teloxide::Bot and implements [`Messenger`]. Production code sends
//! via Telegram; tests substitute a recording mock.

use async_trait::async_trait;
use lovebot_core::{BotError, Chat, Messenger, Result};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, FileId, InputFile};

/// Thin wrapper around teloxide::Bot implementing the core Messenger trait.
pub struct TelegramMessenger {
    bot: teloxide::Bot,
}

impl TelegramMessenger {
    /// Creates a messenger from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send_text(&self, chat: &Chat, text: &str) -> Result<String> {
        let sent = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| BotError::Messenger(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn send_photo(&self, chat: &Chat, bytes: Vec<u8>) -> Result<String> {
        let sent = self
            .bot
            .send_photo(ChatId(chat.id), InputFile::memory(bytes))
            .await
            .map_err(|e| BotError::Messenger(e.to_string()))?;
        Ok(sent.id.to_string())
    }

    async fn fetch_attachment(&self, attachment_ref: &str) -> Result<Vec<u8>> {
        let file = self
            .bot
            .get_file(FileId(attachment_ref.to_owned()))
            .await
            .map_err(|e| BotError::Messenger(e.to_string()))?;

        let mut buf = Vec::new();
        self.bot
            .download_file(&file.path, &mut buf)
            .await
            .map_err(|e| BotError::Messenger(e.to_string()))?;
        Ok(buf)
    }
}
