use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Messenger error: {0}")]
    Messenger(String),

    #[error("Chat is not authorized")]
    Unauthorized,

    /// A conversation is already waiting on this prompt. Invariant
    /// violation on the caller's side; never shown to users.
    #[error("Reply already pending for prompt {prompt_message_id} in chat {chat_id}")]
    DuplicatePrompt {
        chat_id: i64,
        prompt_message_id: String,
    },

    #[error("Reply carries no image attachment")]
    AttachmentMissing,

    #[error("Corpus has no {0}")]
    EmptyCorpus(&'static str),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
