//! Command dispatcher: the authorization-gated command surface and the
//! reply conversations behind /password and /add.
//!
//! Single-step commands (/love, /info) check authorization and act.
//! Multi-step commands send a prompt, register a pending conversation with
//! the [`ConversationTracker`] keyed by the prompt's message id, and finish
//! when the matching reply arrives. The broadcast fan-out reuses the /love
//! send path with the morning category.

use std::sync::Arc;

use lovebot_core::{
    BotError, Chat, ConversationTracker, Message, MessageCategory, Messenger, Result, Store,
};
use rand::seq::SliceRandom;
use tracing::{error, info, instrument, warn};

pub const NOT_AUTHORIZED_TEXT: &str = "You are not authorized.";
pub const ALREADY_AUTHORIZED_TEXT: &str = "You are already authorized.";
pub const PASSWORD_PROMPT_TEXT: &str = "Please send the password as a reply to this message.";
pub const AUTHORIZED_TEXT: &str = "You are now authorized.";
pub const WRONG_PASSWORD_TEXT: &str = "Wrong password, please try again.";
pub const ADD_PROMPT_TEXT: &str = "Send a new image as a reply to this message.";
pub const NOT_AN_IMAGE_TEXT: &str = "Please send exactly one image. Try /add again.";
pub const IMAGE_ADDED_TEXT: &str = "The image was added successfully.";
pub const IMAGE_NOT_ADDED_TEXT: &str = "The image was not added.";
pub const SEARCH_FAILED_TEXT: &str = "Search failed on the server side.";

/// Routes inbound messages: replies to open conversations first, then
/// commands. Cheap to clone; clones share the tracker, store, and
/// messenger.
#[derive(Clone)]
pub struct Dispatcher {
    messenger: Arc<dyn Messenger>,
    store: Arc<dyn Store>,
    tracker: Arc<ConversationTracker>,
    password: String,
    info_message: String,
}

/// First whitespace token of the message text if it is a command, with any
/// `@botname` suffix stripped (commands arrive suffixed in group chats).
fn command_name(message: &Message) -> Option<&str> {
    let token = message.text.as_deref()?.split_whitespace().next()?;
    let name = token.split('@').next().unwrap_or(token);
    name.starts_with('/').then_some(name)
}

/// Compares the candidate against the shared secret without
/// short-circuiting on the first differing byte.
fn secret_matches(candidate: &str, secret: &str) -> bool {
    let (a, b) = (candidate.as_bytes(), secret.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl Dispatcher {
    pub fn new(
        messenger: Arc<dyn Messenger>,
        store: Arc<dyn Store>,
        tracker: Arc<ConversationTracker>,
        password: String,
        info_message: String,
    ) -> Self {
        Self {
            messenger,
            store,
            tracker,
            password,
            info_message,
        }
    }

    /// Handles one inbound message. A reply that matches an open
    /// conversation is consumed by it; everything else is routed by
    /// command. Unknown commands and plain chatter are ignored.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    pub async fn dispatch(&self, message: Message) {
        if let Some(reply_to) = message.reply_to_message_id.clone() {
            if self
                .tracker
                .resolve(message.chat.id, &reply_to, message.clone())
                .await
            {
                return;
            }
        }

        let Some(command) = command_name(&message) else {
            return;
        };
        info!(chat_id = message.chat.id, command = %command, "Dispatching command");
        match command {
            "/love" => self.cmd_love(&message.chat).await,
            "/info" => self.cmd_info(&message.chat).await,
            "/password" => self.cmd_password(&message.chat).await,
            "/add" => self.cmd_add(&message.chat).await,
            _ => {}
        }
    }

    /// Sends a notice, logging (not propagating) a transport failure.
    async fn notify(&self, chat: &Chat, text: &str) {
        if let Err(e) = self.messenger.send_text(chat, text).await {
            error!(chat_id = chat.id, error = %e, "Failed to send notice");
        }
    }

    /// Authorization gate for a command. Sends the not-authorized or
    /// search-failed notice itself; returns true only when the handler may
    /// proceed.
    async fn gate(&self, chat: &Chat) -> bool {
        match self.store.is_authorized(chat.id).await {
            Ok(true) => true,
            Ok(false) => {
                self.notify(chat, NOT_AUTHORIZED_TEXT).await;
                false
            }
            Err(e) => {
                warn!(chat_id = chat.id, error = %e, "Authorization lookup failed");
                self.notify(chat, SEARCH_FAILED_TEXT).await;
                false
            }
        }
    }

    /// /love: one random general text plus one random image.
    #[instrument(skip(self, chat), fields(chat_id = chat.id))]
    pub async fn cmd_love(&self, chat: &Chat) {
        if !self.gate(chat).await {
            return;
        }
        self.send_random(chat, MessageCategory::General).await;
    }

    /// /info: the configured static text.
    #[instrument(skip(self, chat), fields(chat_id = chat.id))]
    pub async fn cmd_info(&self, chat: &Chat) {
        if !self.gate(chat).await {
            return;
        }
        self.notify(chat, &self.info_message).await;
    }

    /// /password: already-authorized chats are informed; others get a
    /// prompt whose reply is checked against the shared secret.
    #[instrument(skip(self, chat), fields(chat_id = chat.id))]
    pub async fn cmd_password(&self, chat: &Chat) {
        match self.store.is_authorized(chat.id).await {
            Ok(true) => self.notify(chat, ALREADY_AUTHORIZED_TEXT).await,
            Ok(false) => self.open_prompt(chat, PASSWORD_PROMPT_TEXT, Self::finish_password).await,
            Err(e) => {
                warn!(chat_id = chat.id, error = %e, "Authorization lookup failed");
                self.notify(chat, SEARCH_FAILED_TEXT).await;
            }
        }
    }

    /// /add: prompt for an image to append to the corpus.
    #[instrument(skip(self, chat), fields(chat_id = chat.id))]
    pub async fn cmd_add(&self, chat: &Chat) {
        if !self.gate(chat).await {
            return;
        }
        self.open_prompt(chat, ADD_PROMPT_TEXT, Self::finish_add).await;
    }

    /// Sends a prompt and registers `finish` to run on the matching reply.
    async fn open_prompt<F, Fut>(&self, chat: &Chat, prompt_text: &str, finish: F)
    where
        F: FnOnce(Dispatcher, Chat, Message) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let prompt_id = match self.messenger.send_text(chat, prompt_text).await {
            Ok(id) => id,
            Err(e) => {
                error!(chat_id = chat.id, error = %e, "Failed to send prompt");
                return;
            }
        };

        let dispatcher = self.clone();
        let chat_for_finish = chat.clone();
        let registered = self
            .tracker
            .register(
                chat.id,
                &prompt_id,
                Box::new(move |reply| Box::pin(finish(dispatcher, chat_for_finish, reply))),
            )
            .await;
        // Prompt ids are transport-unique, so a collision is an invariant
        // violation on our side, never user traffic.
        if let Err(e) = registered {
            error!(chat_id = chat.id, error = %e, "Failed to register conversation");
        }
    }

    /// Second step of /password: compare the reply against the secret and
    /// authorize on match. Authorization is idempotent at the store level.
    #[instrument(skip(self, chat, reply), fields(chat_id = chat.id))]
    async fn finish_password(self, chat: Chat, reply: Message) {
        let candidate = reply.text.as_deref().unwrap_or("");
        if !secret_matches(candidate, &self.password) {
            info!(chat_id = chat.id, "Password mismatch");
            self.notify(&chat, WRONG_PASSWORD_TEXT).await;
            return;
        }

        match self.store.authorize(chat.id).await {
            Ok(()) => {
                info!(chat_id = chat.id, "Chat authorized");
                self.notify(&chat, AUTHORIZED_TEXT).await;
            }
            Err(e) => {
                error!(chat_id = chat.id, error = %e, "Failed to persist authorization");
                self.notify(&chat, SEARCH_FAILED_TEXT).await;
            }
        }
    }

    /// Second step of /add: re-check authorization (it may have changed
    /// between prompt and reply), then download and persist the image.
    #[instrument(skip(self, chat, reply), fields(chat_id = chat.id))]
    async fn finish_add(self, chat: Chat, reply: Message) {
        if !self.gate(&chat).await {
            return;
        }

        let Some(attachment_ref) = reply.photo else {
            info!(chat_id = chat.id, "Add-image reply carries no photo");
            self.notify(&chat, NOT_AN_IMAGE_TEXT).await;
            return;
        };

        let bytes = match self.messenger.fetch_attachment(&attachment_ref).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(chat_id = chat.id, error = %e, "Failed to download image");
                self.notify(&chat, IMAGE_NOT_ADDED_TEXT).await;
                return;
            }
        };

        match self.store.save_image(&bytes).await {
            Ok(()) => {
                info!(chat_id = chat.id, bytes = bytes.len(), "Corpus image added");
                self.notify(&chat, IMAGE_ADDED_TEXT).await;
            }
            Err(e) => {
                error!(chat_id = chat.id, error = %e, "Failed to save image");
                self.notify(&chat, IMAGE_NOT_ADDED_TEXT).await;
            }
        }
    }

    /// Sends one uniformly sampled text from `category`, then one uniformly
    /// sampled image, as two separate sends. A lookup failure or an empty
    /// corpus before the text went out yields the generic search-failed
    /// notice; a failure after that is reported for the image stage only.
    pub async fn send_random(&self, chat: &Chat, category: MessageCategory) {
        let text = match self.pick_text(category).await {
            Ok(text) => text,
            Err(e) => {
                warn!(chat_id = chat.id, error = %e, "Corpus text lookup failed");
                self.notify(chat, SEARCH_FAILED_TEXT).await;
                return;
            }
        };
        if let Err(e) = self.messenger.send_text(chat, &text).await {
            error!(chat_id = chat.id, error = %e, "Failed to send corpus text");
            return;
        }

        let image = match self.pick_image().await {
            Ok(image) => image,
            Err(e) => {
                warn!(chat_id = chat.id, error = %e, "Corpus image lookup failed");
                self.notify(chat, SEARCH_FAILED_TEXT).await;
                return;
            }
        };
        if let Err(e) = self.messenger.send_photo(chat, image).await {
            error!(chat_id = chat.id, error = %e, "Failed to send corpus image");
        }
    }

    async fn pick_text(&self, category: MessageCategory) -> Result<String> {
        let messages = self.store.find_messages(category).await?;
        let message = messages
            .choose(&mut rand::thread_rng())
            .ok_or(BotError::EmptyCorpus("messages"))?;
        Ok(message.text.clone())
    }

    async fn pick_image(&self) -> Result<Vec<u8>> {
        let images = self.store.find_images().await?;
        let image = images
            .choose(&mut rand::thread_rng())
            .ok_or(BotError::EmptyCorpus("images"))?;
        Ok(image.content.clone())
    }

    /// Daily fan-out: a morning text+image to every authorized chat. The
    /// registry is queried at fire time, so chats authorized since startup
    /// are included. Sends to different chats run concurrently and fail
    /// independently; within one chat the text still precedes the image.
    #[instrument(skip(self))]
    pub async fn broadcast(&self) {
        let chats = match self.store.authorized_chats().await {
            Ok(chats) => chats,
            Err(e) => {
                error!(error = %e, "Broadcast registry lookup failed");
                return;
            }
        };
        info!(chat_count = chats.len(), "Broadcasting morning message");

        let mut handles = Vec::new();
        for chat_id in chats {
            let dispatcher = self.clone();
            handles.push(tokio::spawn(async move {
                dispatcher
                    .send_random(&Chat { id: chat_id }, MessageCategory::Morning)
                    .await;
            }));
        }
        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Broadcast send task panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn text_message(text: &str) -> Message {
        Message {
            id: "m1".to_string(),
            chat: Chat { id: 1 },
            text: Some(text.to_string()),
            photo: None,
            reply_to_message_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_command_name_parsing() {
        assert_eq!(command_name(&text_message("/love")), Some("/love"));
        assert_eq!(command_name(&text_message("/add@lovebot some")), Some("/add"));
        assert_eq!(command_name(&text_message("  /info extra")), Some("/info"));
        assert_eq!(command_name(&text_message("hello")), None);
        assert_eq!(command_name(&text_message("")), None);
    }

    #[test]
    fn test_secret_matches() {
        assert!(secret_matches("xyz789", "xyz789"));
        assert!(!secret_matches("xyz788", "xyz789"));
        assert!(!secret_matches("xyz78", "xyz789"));
        assert!(!secret_matches("", "xyz789"));
        assert!(secret_matches("", ""));
    }
}
