//! REPL runner: converts teloxide messages to core messages and passes
//! them to the dispatcher, spawned per message so a slow conversation
//! never blocks the update stream.

use anyhow::Result;
use lovebot_core::ToCoreMessage;
use teloxide::prelude::*;
use tracing::{info, instrument};

use super::adapters::TelegramMessageWrapper;
use crate::dispatcher::Dispatcher;

/// Starts the REPL with the given teloxide Bot and dispatcher. Each
/// message is converted to a core message and handled in a spawned task.
#[instrument(skip(bot, dispatcher))]
pub async fn run_repl(bot: teloxide::Bot, dispatcher: Dispatcher) -> Result<()> {
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let dispatcher = dispatcher.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            info!(
                chat_id = core_msg.chat.id,
                message_id = %core_msg.id,
                has_text = core_msg.text.is_some(),
                has_photo = core_msg.photo.is_some(),
                is_reply = core_msg.reply_to_message_id.is_some(),
                "Received message"
            );

            // Dispatch in a spawned task so the REPL returns immediately.
            tokio::spawn(async move {
                dispatcher.dispatch(core_msg).await;
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
