//! # Item Service
//!
//! Business rules in front of an [`ItemRepository`]. Reads are forwarded
//! unchanged; writes are validated first.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::{ItemError, ItemResult};
use super::item::TodoItem;
use super::repository::ItemRepository;

/// Operations exposed to the request-handling layer
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Incomplete items
    async fn list_items(&self) -> ItemResult<Vec<TodoItem>>;

    /// One item by id
    async fn get_item(&self, id: Uuid) -> ItemResult<TodoItem>;

    /// Mark an item completed after checking the payload
    async fn update_item(&self, id: Uuid, item: &TodoItem) -> ItemResult<()>;

    /// Validate and persist a new item
    async fn create_item(&self, item: &TodoItem) -> ItemResult<()>;
}

/// Default [`ItemService`] over any repository
#[derive(Debug, Clone)]
pub struct TodoItemService {
    repository: Arc<dyn ItemRepository>,
}

impl TodoItemService {
    /// Create a service over the given repository
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    fn require_description(item: &TodoItem) -> ItemResult<()> {
        if item.description.is_empty() {
            tracing::info!(event = "ITEM_REJECTED", item_id = %item.id, reason = "description required");
            return Err(ItemError::description_required());
        }
        Ok(())
    }
}

#[async_trait]
impl ItemService for TodoItemService {
    async fn list_items(&self) -> ItemResult<Vec<TodoItem>> {
        self.repository.list_incomplete().await
    }

    async fn get_item(&self, id: Uuid) -> ItemResult<TodoItem> {
        self.repository.get_by_id(id).await
    }

    async fn update_item(&self, id: Uuid, item: &TodoItem) -> ItemResult<()> {
        Self::require_description(item)?;
        self.repository.mark_complete(id, item).await?;
        tracing::info!(event = "ITEM_COMPLETED", item_id = %id);
        Ok(())
    }

    async fn create_item(&self, item: &TodoItem) -> ItemResult<()> {
        Self::require_description(item)?;

        if self
            .repository
            .exists_incomplete_with_description(&item.description)
            .await?
        {
            tracing::info!(event = "ITEM_REJECTED", item_id = %item.id, reason = "description already exists");
            return Err(ItemError::description_exists());
        }

        self.repository.insert(item).await?;
        tracing::info!(event = "ITEM_CREATED", item_id = %item.id);
        Ok(())
    }
}
