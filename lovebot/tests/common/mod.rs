//! Shared helpers for dispatcher/broadcast integration tests: the mock
//! messenger, message builders, and a dispatcher wired to an in-memory
//! SQLite store.

pub mod mock_messenger;

use std::sync::Arc;

use chrono::Utc;
use lovebot::{Chat, ConversationTracker, Dispatcher, Message, Store};
use storage::SqliteStore;

pub use mock_messenger::{MockMessenger, Sent};

// Not every test binary touches every helper below.
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "xyz789";
#[allow(dead_code)]
pub const TEST_INFO: &str = "Test bot info text.";

/// A fresh dispatcher over an in-memory store and a recording messenger.
#[allow(dead_code)] // not every test binary uses every handle
pub struct TestBot {
    pub dispatcher: Dispatcher,
    pub messenger: Arc<MockMessenger>,
    pub store: Arc<SqliteStore>,
    pub tracker: Arc<ConversationTracker>,
}

pub async fn test_bot() -> TestBot {
    let messenger = Arc::new(MockMessenger::new());
    let store = Arc::new(
        SqliteStore::new("sqlite::memory:")
            .await
            .expect("Failed to create store"),
    );
    let tracker = Arc::new(ConversationTracker::new());
    let dispatcher = Dispatcher::new(
        messenger.clone(),
        store.clone(),
        tracker.clone(),
        TEST_PASSWORD.to_string(),
        TEST_INFO.to_string(),
    );
    TestBot {
        dispatcher,
        messenger,
        store,
        tracker,
    }
}

/// An inbound text message (commands included).
#[allow(dead_code)]
pub fn text_message(chat_id: i64, text: &str) -> Message {
    Message {
        id: format!("in-{}", chat_id),
        chat: Chat { id: chat_id },
        text: Some(text.to_string()),
        photo: None,
        reply_to_message_id: None,
        created_at: Utc::now(),
    }
}

/// An inbound reply to `reply_to` carrying optional text and photo.
#[allow(dead_code)]
pub fn reply_message(
    chat_id: i64,
    reply_to: &str,
    text: Option<&str>,
    photo: Option<&str>,
) -> Message {
    Message {
        id: format!("in-reply-{}", chat_id),
        chat: Chat { id: chat_id },
        text: text.map(|s| s.to_string()),
        photo: photo.map(|s| s.to_string()),
        reply_to_message_id: Some(reply_to.to_string()),
        created_at: Utc::now(),
    }
}

/// Authorizes a chat directly in the store (test setup shortcut).
#[allow(dead_code)]
pub async fn authorize(store: &SqliteStore, chat_id: i64) {
    store.authorize(chat_id).await.expect("Failed to authorize");
}
