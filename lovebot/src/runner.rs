//! Main entry: init logging, validate config, build components, spawn the
//! scheduler and the tracker sweep, then run the REPL.

use std::sync::Arc;

use anyhow::Result;
use lovebot_core::{init_tracing, ConversationTracker};
use storage::SqliteStore;
use tracing::{info, instrument};

use crate::config::BotConfig;
use crate::dispatcher::Dispatcher;
use crate::scheduler::BroadcastScheduler;
use crate::telegram::{run_repl, TelegramMessenger};

/// How often abandoned conversations are swept, and how old a pending
/// prompt must be to be dropped. Hardening bounds, not product behavior.
const SWEEP_INTERVAL_SECS: u64 = 3600;
const SWEEP_MAX_AGE_HOURS: i64 = 24;

/// Builds the teloxide bot, honoring TELEGRAM_API_URL when set.
fn build_teloxide_bot(config: &BotConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match &config.telegram_api_url {
        Some(url) => {
            let url = reqwest::Url::parse(url)?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Runs the bot until the process is stopped.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    std::fs::create_dir_all("logs")?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        broadcast_time = %config.broadcast_time,
        "Initializing bot"
    );

    let store = Arc::new(SqliteStore::new(&config.database_url).await?);
    let bot = build_teloxide_bot(&config)?;
    let messenger = Arc::new(TelegramMessenger::new(bot.clone()));
    let tracker = Arc::new(ConversationTracker::new());

    let dispatcher = Dispatcher::new(
        messenger,
        store,
        tracker.clone(),
        config.password.clone(),
        config.info_message.clone(),
    );

    tokio::spawn(BroadcastScheduler::new(dispatcher.clone(), config.broadcast_time).run());
    tokio::spawn(sweep_abandoned_conversations(tracker));

    info!("Bot started successfully");

    run_repl(bot, dispatcher).await
}

/// Hourly sweep dropping prompts nobody answered for a day.
async fn sweep_abandoned_conversations(tracker: Arc<ConversationTracker>) {
    let mut interval =
        tokio::time::interval(std::time::Duration::from_secs(SWEEP_INTERVAL_SECS));
    interval.tick().await; // first tick completes immediately
    loop {
        interval.tick().await;
        tracker.expire(chrono::Duration::hours(SWEEP_MAX_AGE_HOURS)).await;
    }
}
