//! Store abstraction over the corpus and the authorization registry.
//!
//! The SQLite implementation lives in the `storage` crate; tests may use
//! any in-memory substitute.

use crate::error::Result;
use crate::types::{CorpusImage, CorpusMessage, MessageCategory};
use async_trait::async_trait;

/// Persistence capability: corpus texts and images plus the set of
/// authorized chats.
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns all corpus messages in the given category.
    async fn find_messages(&self, category: MessageCategory) -> Result<Vec<CorpusMessage>>;

    /// Returns all corpus images.
    async fn find_images(&self) -> Result<Vec<CorpusImage>>;

    /// Adds a corpus message. Used by the seed CLI; the bot itself never
    /// writes texts.
    async fn save_message(&self, text: &str, category: MessageCategory) -> Result<()>;

    /// Adds a corpus image.
    async fn save_image(&self, content: &[u8]) -> Result<()>;

    /// Whether the chat has an authorization record.
    async fn is_authorized(&self, chat_id: i64) -> Result<bool>;

    /// Creates an authorization record for the chat. Idempotent: a chat
    /// that is already authorized keeps exactly one record.
    async fn authorize(&self, chat_id: i64) -> Result<()>;

    /// All authorized chat ids. Queried by the broadcast at fire time, so
    /// chats authorized after startup are included.
    async fn authorized_chats(&self) -> Result<Vec<i64>>;
}
