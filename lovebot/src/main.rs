//! Binary for the lovebot Telegram bot.

use anyhow::Result;
use clap::Parser;
use lovebot::{load_config, run_bot, seed, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Seed { file } => {
            let database_url = std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:lovebot.db".to_string());
            seed::cmd_seed(&database_url, &file).await
        }
    }
}
