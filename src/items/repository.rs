//! # Item Repository Trait

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::ItemResult;
use super::item::TodoItem;

/// Persistence gateway for todo items.
///
/// Implementations perform no business validation; callers are expected to
/// have checked the item first. Every mutating call is committed before it
/// returns.
#[async_trait]
pub trait ItemRepository: Send + Sync + std::fmt::Debug {
    /// All items that are not completed, in no particular order
    async fn list_incomplete(&self) -> ItemResult<Vec<TodoItem>>;

    /// Fetch one item, failing with `NotFound` if absent
    async fn get_by_id(&self, id: Uuid) -> ItemResult<TodoItem>;

    /// Append a new item
    async fn insert(&self, item: &TodoItem) -> ItemResult<()>;

    /// Mark an existing item completed.
    ///
    /// Only the completion flag changes; the other fields of `item` are
    /// ignored.
    async fn mark_complete(&self, id: Uuid, item: &TodoItem) -> ItemResult<()>;

    /// Whether an incomplete item already uses this description (case-insensitive)
    async fn exists_incomplete_with_description(&self, description: &str) -> ItemResult<bool>;
}
