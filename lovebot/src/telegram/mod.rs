//! Telegram layer: teloxide adapters, the [`TelegramMessenger`], and the
//! REPL runner. Only this module touches teloxide types; everything above
//! it speaks core types.

mod adapters;
mod messenger;
mod runner;

pub use adapters::TelegramMessageWrapper;
pub use messenger::TelegramMessenger;
pub use runner::run_repl;
