//! Messenger abstraction for the outbound side of the transport.
//!
//! The trait is transport-agnostic; the Telegram implementation lives in the
//! `lovebot` crate. Tests substitute a recording mock.

use crate::error::Result;
use crate::types::Chat;
use async_trait::async_trait;

/// Sends messages and resolves attachments. Implementations map to a
/// transport (e.g. Telegram).
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Sends a text message to the given chat and returns its message id,
    /// so a conversation can be registered against it as a prompt.
    async fn send_text(&self, chat: &Chat, text: &str) -> Result<String>;

    /// Sends a photo (raw bytes) to the given chat and returns its message id.
    async fn send_photo(&self, chat: &Chat, bytes: Vec<u8>) -> Result<String>;

    /// Downloads the attachment behind a transport reference (e.g. a
    /// Telegram file id taken from [`crate::Message::photo`]).
    async fn fetch_attachment(&self, attachment_ref: &str) -> Result<Vec<u8>>;
}
