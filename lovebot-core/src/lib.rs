//! # lovebot-core
//!
//! Transport- and storage-agnostic core of the bot: domain types, error
//! taxonomy, the [`Messenger`] and [`Store`] capability traits, the
//! [`ConversationTracker`] that correlates prompts with replies, and
//! tracing initialization. Telegram and SQLite implementations live in the
//! `lovebot` and `storage` crates.

pub mod conversation;
pub mod error;
pub mod logger;
pub mod messenger;
pub mod store;
pub mod types;

pub use conversation::{Continuation, ConversationTracker, ReplyFuture};
pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use messenger::Messenger;
pub use store::Store;
pub use types::{Chat, CorpusImage, CorpusMessage, Message, MessageCategory, ToCoreMessage};
