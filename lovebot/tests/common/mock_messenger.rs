//! Mock implementation of [`lovebot::Messenger`] for integration tests.
//!
//! Records every successful send so tests can assert on order and content,
//! hands out sequential message ids (so a test can reply to a recorded
//! prompt), and can be told to fail all sends to a given chat.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use lovebot::{BotError, Chat, Messenger, Result};

/// One recorded outbound send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    Photo { chat_id: i64, bytes: Vec<u8> },
}

/// Recording mock messenger. Message ids start at "1" and increase with
/// every successful send across all chats.
pub struct MockMessenger {
    next_id: AtomicUsize,
    sent: Mutex<Vec<Sent>>,
    fail_chats: Mutex<HashSet<i64>>,
}

#[allow(dead_code)] // not every test binary uses every accessor
impl MockMessenger {
    pub fn new() -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            sent: Mutex::new(Vec::new()),
            fail_chats: Mutex::new(HashSet::new()),
        }
    }

    /// Fail every send to `chat_id` from now on.
    pub fn fail_for(&self, chat_id: i64) {
        self.fail_chats.lock().unwrap().insert(chat_id);
    }

    /// All recorded sends, in order.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Recorded sends to one chat, in order.
    pub fn sent_to(&self, chat_id: i64) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| match s {
                Sent::Text { chat_id: id, .. } | Sent::Photo { chat_id: id, .. } => *id == chat_id,
            })
            .collect()
    }

    /// Text bodies sent to one chat, in order.
    pub fn texts_to(&self, chat_id: i64) -> Vec<String> {
        self.sent_to(chat_id)
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                Sent::Photo { .. } => None,
            })
            .collect()
    }

    /// Id of the most recent successful send. Tests use this as the prompt
    /// id to reply to.
    pub fn last_message_id(&self) -> String {
        (self.next_id.load(Ordering::SeqCst) - 1).to_string()
    }

    /// The bytes `fetch_attachment` returns for a given reference.
    pub fn attachment_bytes(attachment_ref: &str) -> Vec<u8> {
        format!("IMG:{}", attachment_ref).into_bytes()
    }

    fn check_failure(&self, chat_id: i64) -> Result<()> {
        if self.fail_chats.lock().unwrap().contains(&chat_id) {
            return Err(BotError::Messenger("injected send failure".to_string()));
        }
        Ok(())
    }

    fn record(&self, item: Sent) -> String {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(item);
        id.to_string()
    }
}

impl Default for MockMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send_text(&self, chat: &Chat, text: &str) -> Result<String> {
        self.check_failure(chat.id)?;
        Ok(self.record(Sent::Text {
            chat_id: chat.id,
            text: text.to_string(),
        }))
    }

    async fn send_photo(&self, chat: &Chat, bytes: Vec<u8>) -> Result<String> {
        self.check_failure(chat.id)?;
        Ok(self.record(Sent::Photo {
            chat_id: chat.id,
            bytes,
        }))
    }

    async fn fetch_attachment(&self, attachment_ref: &str) -> Result<Vec<u8>> {
        Ok(Self::attachment_bytes(attachment_ref))
    }
}
