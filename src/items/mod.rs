//! # Todo Items
//!
//! The item domain in three layers:
//!
//! - [`ItemRepository`]: persistence gateway ([`SqliteItemRepository`],
//!   [`InMemoryItemRepository`])
//! - [`ItemService`]: validation in front of the repository ([`TodoItemService`])
//! - HTTP handlers live in `crate::http_server::item_routes`
//!
//! # Lifecycle
//!
//! An item is created incomplete and may be marked completed once. Completed
//! items are hidden from listings but remain fetchable by id. Nothing is ever
//! deleted.

pub mod errors;
pub mod item;
pub mod memory;
pub mod repository;
pub mod service;
pub mod sqlite;

pub use errors::{ItemError, ItemResult};
pub use item::TodoItem;
pub use memory::InMemoryItemRepository;
pub use repository::ItemRepository;
pub use service::{ItemService, TodoItemService};
pub use sqlite::SqliteItemRepository;
