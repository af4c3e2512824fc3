//! SQLite-backed [`Store`]: corpus tables and the authorized-chat registry.
//!
//! Uses SqlitePoolManager and the row models (MessageRecord, ImageRecord).
//! sqlx errors are mapped to [`BotError::Store`] at the trait boundary.

use async_trait::async_trait;
use lovebot_core::{BotError, CorpusImage, CorpusMessage, MessageCategory, Result, Store};
use tracing::info;

use crate::models::{ImageRecord, MessageRecord};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteStore {
    pool_manager: SqlitePoolManager,
}

fn store_err(e: sqlx::Error) -> BotError {
    BotError::Store(e.to_string())
}

impl SqliteStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool_manager = SqlitePoolManager::new(database_url)
            .await
            .map_err(store_err)?;
        let store = Self { pool_manager };
        store.init().await.map_err(store_err)?;
        Ok(store)
    }

    async fn init(&self) -> std::result::Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                text TEXT NOT NULL,
                category TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS images (
                id TEXT PRIMARY KEY,
                content BLOB NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS authorized_chats (
                chat_id INTEGER PRIMARY KEY,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_messages_category ON messages(category)")
            .execute(pool)
            .await?;

        info!("Database tables created successfully");
        Ok(())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn find_messages(&self, category: MessageCategory) -> Result<Vec<CorpusMessage>> {
        let pool = self.pool_manager.pool();

        let records: Vec<MessageRecord> =
            sqlx::query_as("SELECT * FROM messages WHERE category = ?")
                .bind(category.as_str())
                .fetch_all(pool)
                .await
                .map_err(store_err)?;

        Ok(records
            .into_iter()
            .map(|r| CorpusMessage {
                id: r.id,
                text: r.text,
                category,
            })
            .collect())
    }

    async fn find_images(&self) -> Result<Vec<CorpusImage>> {
        let pool = self.pool_manager.pool();

        let records: Vec<ImageRecord> = sqlx::query_as("SELECT * FROM images")
            .fetch_all(pool)
            .await
            .map_err(store_err)?;

        Ok(records
            .into_iter()
            .map(|r| CorpusImage {
                id: r.id,
                content: r.content,
            })
            .collect())
    }

    async fn save_message(&self, text: &str, category: MessageCategory) -> Result<()> {
        let record = MessageRecord::new(text.to_string(), category.as_str().to_string());
        let pool = self.pool_manager.pool();

        sqlx::query("INSERT INTO messages (id, text, category, created_at) VALUES (?, ?, ?, ?)")
            .bind(&record.id)
            .bind(&record.text)
            .bind(&record.category)
            .bind(record.created_at)
            .execute(pool)
            .await
            .map_err(store_err)?;

        info!(id = %record.id, category = %record.category, "Saved corpus message");
        Ok(())
    }

    async fn save_image(&self, content: &[u8]) -> Result<()> {
        let record = ImageRecord::new(content.to_vec());
        let pool = self.pool_manager.pool();

        sqlx::query("INSERT INTO images (id, content, created_at) VALUES (?, ?, ?)")
            .bind(&record.id)
            .bind(&record.content)
            .bind(record.created_at)
            .execute(pool)
            .await
            .map_err(store_err)?;

        info!(id = %record.id, bytes = record.content.len(), "Saved corpus image");
        Ok(())
    }

    async fn is_authorized(&self, chat_id: i64) -> Result<bool> {
        let pool = self.pool_manager.pool();

        let row: (i64,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM authorized_chats WHERE chat_id = ?)")
                .bind(chat_id)
                .fetch_one(pool)
                .await
                .map_err(store_err)?;

        Ok(row.0 != 0)
    }

    async fn authorize(&self, chat_id: i64) -> Result<()> {
        let pool = self.pool_manager.pool();

        // INSERT OR IGNORE keeps authorization idempotent: re-submitting
        // the password never creates a second record.
        let result = sqlx::query(
            "INSERT OR IGNORE INTO authorized_chats (chat_id, created_at) VALUES (?, ?)",
        )
        .bind(chat_id)
        .bind(chrono::Utc::now())
        .execute(pool)
        .await
        .map_err(store_err)?;

        info!(
            chat_id,
            newly_authorized = result.rows_affected() > 0,
            "Authorized chat"
        );
        Ok(())
    }

    async fn authorized_chats(&self) -> Result<Vec<i64>> {
        let pool = self.pool_manager.pool();

        let rows: Vec<(i64,)> = sqlx::query_as("SELECT chat_id FROM authorized_chats")
            .fetch_all(pool)
            .await
            .map_err(store_err)?;

        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
