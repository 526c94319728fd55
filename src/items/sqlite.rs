//! # SQLite Item Repository
//!
//! Durable [`ItemRepository`] over a `sqlx::SqlitePool`.
//!
//! The schema lives in `migrations/` and is embedded with `sqlx::migrate!`;
//! [`SqliteItemRepository::connect`] applies it before returning. Ids are
//! stored as hyphenated UUID text. Alongside each description the lowercased
//! `description_key` is stored, which backs both the duplicate lookup and a
//! partial unique index over incomplete rows.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use uuid::Uuid;

use super::errors::{ItemError, ItemResult};
use super::item::{description_key, TodoItem};
use super::repository::ItemRepository;

/// URL of a private in-memory database
pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Debug, FromRow)]
struct ItemRow {
    id: String,
    description: String,
    is_completed: bool,
}

impl TryFrom<ItemRow> for TodoItem {
    type Error = ItemError;

    fn try_from(row: ItemRow) -> ItemResult<Self> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| ItemError::Store(format!("corrupt item id '{}': {}", row.id, e)))?;
        Ok(TodoItem {
            id,
            description: row.description,
            is_completed: row.is_completed,
        })
    }
}

/// SQLite-backed item repository
#[derive(Debug, Clone)]
pub struct SqliteItemRepository {
    pool: SqlitePool,
}

impl SqliteItemRepository {
    /// Wrap an existing pool. The schema must already be applied.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if missing) the database at `url` and apply migrations
    pub async fn connect(url: &str, max_connections: u32) -> ItemResult<Self> {
        let mut options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections);
        if in_memory {
            // Every connection to :memory: is its own database; keep exactly one alive.
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options.connect_with(options).await?;
        let repo = Self::new(pool);
        repo.migrate().await?;
        tracing::debug!(event = "SCHEMA_READY", database_url = url);
        Ok(repo)
    }

    /// Fresh private in-memory database with the schema applied
    pub async fn in_memory() -> ItemResult<Self> {
        Self::connect(MEMORY_DATABASE_URL, 1).await
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> ItemResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Underlying pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn map_insert_error(err: sqlx::Error) -> ItemError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() && db.message().contains("description_key") {
            return ItemError::description_exists();
        }
    }
    ItemError::from(err)
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn list_incomplete(&self) -> ItemResult<Vec<TodoItem>> {
        let rows: Vec<ItemRow> = sqlx::query_as(
            "SELECT id, description, is_completed FROM todo_items WHERE is_completed = 0",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TodoItem::try_from).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<TodoItem> {
        let row: Option<ItemRow> =
            sqlx::query_as("SELECT id, description, is_completed FROM todo_items WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => row.try_into(),
            None => {
                tracing::info!(event = "ITEM_NOT_FOUND", item_id = %id);
                Err(ItemError::NotFound(id))
            }
        }
    }

    async fn insert(&self, item: &TodoItem) -> ItemResult<()> {
        sqlx::query(
            "INSERT INTO todo_items (id, description, description_key, is_completed) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(item.id.to_string())
        .bind(&item.description)
        .bind(item.description_key())
        .bind(item.is_completed)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    async fn mark_complete(&self, id: Uuid, _item: &TodoItem) -> ItemResult<()> {
        let result = sqlx::query("UPDATE todo_items SET is_completed = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::info!(event = "ITEM_NOT_FOUND", item_id = %id);
            return Err(ItemError::NotFound(id));
        }
        Ok(())
    }

    async fn exists_incomplete_with_description(&self, description: &str) -> ItemResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM todo_items WHERE is_completed = 0 AND description_key = ?)",
        )
        .bind(description_key(description))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
