//! # storage
//!
//! SQLite implementation of the core [`lovebot_core::Store`] trait: corpus
//! texts, corpus images, and the authorized-chat registry.

pub mod models;
pub mod sqlite_pool;
pub mod sqlite_store;

pub use models::{ImageRecord, MessageRecord};
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_store::SqliteStore;
