//! # In-Memory Item Repository

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::{ItemError, ItemResult};
use super::item::{description_key, TodoItem};
use super::repository::ItemRepository;

/// Non-durable repository backed by a map. Contents are lost on shutdown.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    items: RwLock<HashMap<Uuid, TodoItem>>,
}

impl InMemoryItemRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> ItemError {
        ItemError::Store("item map lock poisoned".to_string())
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list_incomplete(&self) -> ItemResult<Vec<TodoItem>> {
        let items = self.items.read().map_err(|_| Self::poisoned())?;
        Ok(items.values().filter(|i| !i.is_completed).cloned().collect())
    }

    async fn get_by_id(&self, id: Uuid) -> ItemResult<TodoItem> {
        let items = self.items.read().map_err(|_| Self::poisoned())?;
        items.get(&id).cloned().ok_or(ItemError::NotFound(id))
    }

    async fn insert(&self, item: &TodoItem) -> ItemResult<()> {
        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        items.insert(item.id, item.clone());
        Ok(())
    }

    async fn mark_complete(&self, id: Uuid, _item: &TodoItem) -> ItemResult<()> {
        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        match items.get_mut(&id) {
            Some(existing) => {
                existing.is_completed = true;
                Ok(())
            }
            None => Err(ItemError::NotFound(id)),
        }
    }

    async fn exists_incomplete_with_description(&self, description: &str) -> ItemResult<bool> {
        let key = description_key(description);
        let items = self.items.read().map_err(|_| Self::poisoned())?;
        Ok(items
            .values()
            .any(|i| !i.is_completed && i.description_key() == key))
    }
}
