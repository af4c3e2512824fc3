//! Corpus message row model.
//!
//! Maps to the `messages` table; `category` is the lowercase form of
//! [`lovebot_core::MessageCategory`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: String,
    pub text: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    /// Creates a new record with a generated UUID and current timestamp.
    pub fn new(text: String, category: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            category,
            created_at: Utc::now(),
        }
    }
}
