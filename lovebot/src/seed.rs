//! Seed subcommand: load corpus messages from a JSON file into the store.
//!
//! The bot itself never writes texts; this is the out-of-band path that
//! fills the corpus the broadcasts and /love draw from.

use std::path::Path;

use anyhow::{Context, Result};
use lovebot_core::{MessageCategory, Store};
use serde::Deserialize;
use storage::SqliteStore;

/// One seed entry.
#[derive(Debug, Deserialize)]
pub struct SeedMessage {
    pub text: String,
    pub category: MessageCategory,
}

/// Reads a JSON array of seed messages and inserts each into the corpus.
pub async fn cmd_seed(database_url: &str, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read seed file {}", file.display()))?;
    let messages: Vec<SeedMessage> =
        serde_json::from_str(&raw).context("Seed file is not a JSON array of {text, category}")?;

    let store = SqliteStore::new(database_url).await?;
    for message in &messages {
        store.save_message(&message.text, message.category).await?;
    }

    println!("Seeded {} corpus messages", messages.len());
    Ok(())
}
