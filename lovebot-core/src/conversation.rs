//! Conversation tracker: correlates an outbound prompt with the next
//! inbound reply in the same chat.
//!
//! Each open conversation is a pending entry keyed by
//! `(chat_id, prompt_message_id)` holding the continuation to run when the
//! matching reply arrives. Entries are removed before the continuation is
//! invoked, so a reply is consumed at most once and the map lock is never
//! held across a continuation await.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{BotError, Result};
use crate::types::Message;

/// Future returned by a continuation.
pub type ReplyFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Continuation invoked with the reply that resolved the conversation.
pub type Continuation = Box<dyn FnOnce(Message) -> ReplyFuture + Send + 'static>;

struct PendingReply {
    continuation: Continuation,
    created_at: DateTime<Utc>,
}

/// Tracks open conversations across all chats. Safe under concurrent
/// register/resolve calls, including overlapping conversations in the same
/// chat as long as they hang off distinct prompt messages.
#[derive(Default)]
pub struct ConversationTracker {
    pending: Mutex<HashMap<(i64, String), PendingReply>>,
}

impl ConversationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a continuation for the next reply to `prompt_message_id`
    /// in `chat_id`. Errors with [`BotError::DuplicatePrompt`] if a
    /// conversation is already waiting on that prompt; overwriting would
    /// silently drop the first conversation's continuation.
    pub async fn register(
        &self,
        chat_id: i64,
        prompt_message_id: &str,
        continuation: Continuation,
    ) -> Result<()> {
        let mut pending = self.pending.lock().await;
        let key = (chat_id, prompt_message_id.to_string());
        if pending.contains_key(&key) {
            return Err(BotError::DuplicatePrompt {
                chat_id,
                prompt_message_id: prompt_message_id.to_string(),
            });
        }
        pending.insert(
            key,
            PendingReply {
                continuation,
                created_at: Utc::now(),
            },
        );
        debug!(chat_id, prompt_message_id, "Conversation registered");
        Ok(())
    }

    /// Resolves the conversation waiting on `prompt_message_id` in
    /// `chat_id`, if any, and runs its continuation with `reply`. Returns
    /// whether a conversation was consumed. A reply that matches no open
    /// conversation is expected traffic, not an error.
    ///
    /// The entry is removed before the continuation runs, so duplicate
    /// delivery of the same reply cannot invoke it twice, and a slow
    /// continuation cannot stall unrelated register/resolve calls.
    pub async fn resolve(&self, chat_id: i64, prompt_message_id: &str, reply: Message) -> bool {
        let entry = {
            let mut pending = self.pending.lock().await;
            pending.remove(&(chat_id, prompt_message_id.to_string()))
        };
        match entry {
            Some(entry) => {
                debug!(chat_id, prompt_message_id, "Conversation resolved");
                (entry.continuation)(reply).await;
                true
            }
            None => false,
        }
    }

    /// Removes conversations registered more than `older_than` ago and
    /// returns how many were dropped. Hardening sweep: abandoned prompts
    /// are never resolved and would otherwise accumulate forever.
    pub async fn expire(&self, older_than: Duration) -> usize {
        let cutoff = Utc::now() - older_than;
        let mut pending = self.pending.lock().await;
        let before = pending.len();
        pending.retain(|_, entry| entry.created_at >= cutoff);
        let removed = before - pending.len();
        if removed > 0 {
            info!(removed, "Expired abandoned conversations");
        }
        removed
    }

    /// Number of open conversations.
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}
