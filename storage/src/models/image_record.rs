//! Corpus image row model. Maps to the `images` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ImageRecord {
    pub id: String,
    pub content: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl ImageRecord {
    /// Creates a new record with a generated UUID and current timestamp.
    pub fn new(content: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            created_at: Utc::now(),
        }
    }
}
