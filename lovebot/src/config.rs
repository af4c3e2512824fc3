//! Bot config: Telegram connection, shared password, info text, broadcast
//! time, logging, database. Loaded from env.

use anyhow::Result;
use chrono::NaiveTime;
use std::env;

/// Full bot config. Use [`BotConfig::load`] for env-based loading and call
/// [`BotConfig::validate`] after load to fail fast before init.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL (optional self-hosted Bot API server)
    pub telegram_api_url: Option<String>,
    /// BOT_PASSWORD: the shared secret that gates authorization
    pub password: String,
    /// INFO_MESSAGE: static reply to /info
    pub info_message: String,
    /// BROADCAST_TIME: local wall-clock time of the daily broadcast
    pub broadcast_time: NaiveTime,
    /// Corpus + registry database URL (SQLite)
    pub database_url: String,
    /// Log file path
    pub log_file: String,
}

fn default_broadcast_time() -> NaiveTime {
    NaiveTime::from_hms_opt(8, 0, 0).expect("static time is valid")
}

fn parse_broadcast_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| anyhow::anyhow!("BROADCAST_TIME is not a valid HH:MM[:SS] time: {}", s))
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if
    /// provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let password =
            env::var("BOT_PASSWORD").map_err(|_| anyhow::anyhow!("BOT_PASSWORD not set"))?;
        let info_message = env::var("INFO_MESSAGE").unwrap_or_else(|_| {
            "This bot sends a daily dose of love to authorized chats.".to_string()
        });
        let broadcast_time = match env::var("BROADCAST_TIME") {
            Ok(s) => parse_broadcast_time(&s)?,
            Err(_) => default_broadcast_time(),
        };
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:lovebot.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/lovebot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL").ok();

        Ok(Self {
            bot_token,
            telegram_api_url,
            password,
            info_message,
            broadcast_time,
            database_url,
            log_file,
        })
    }

    /// Validate config (non-empty secret; telegram_api_url must be a valid
    /// URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.password.is_empty() {
            anyhow::bail!("BOT_PASSWORD must not be empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
