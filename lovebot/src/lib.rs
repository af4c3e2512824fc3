//! # lovebot
//!
//! Password-gated Telegram bot that keeps a small corpus of texts and
//! images and broadcasts a random morning pair to every authorized chat
//! once a day. Wires lovebot-core (tracker, traits) and storage (SQLite)
//! to the Telegram transport; loads config from env and runs the REPL.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod runner;
pub mod scheduler;
pub mod seed;
pub mod telegram;

pub use cli::{load_config, Cli, Commands};
pub use config::BotConfig;
pub use dispatcher::Dispatcher;
pub use runner::run_bot;
pub use scheduler::{next_occurrence, BroadcastScheduler};
pub use telegram::{run_repl, TelegramMessageWrapper, TelegramMessenger};

// Re-export core for integration tests and embedders.
pub use lovebot_core::{
    init_tracing, BotError, Chat, ConversationTracker, CorpusImage, CorpusMessage, Message,
    MessageCategory, Messenger, Result, Store, ToCoreMessage,
};
