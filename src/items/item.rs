//! # Todo Item

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo entry.
///
/// Serialized with camelCase keys so the wire shape is
/// `{ "id", "description", "isCompleted" }`. Missing fields fall back to
/// their defaults, which lets an update body omit `isCompleted`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TodoItem {
    pub id: Uuid,
    pub description: String,
    pub is_completed: bool,
}

impl TodoItem {
    /// Create a new, incomplete item with a freshly generated id
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            is_completed: false,
        }
    }

    /// Case-folded description used for duplicate detection
    pub fn description_key(&self) -> String {
        description_key(&self.description)
    }
}

/// Normalize a description for case-insensitive comparison
pub fn description_key(description: &str) -> String {
    description.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_incomplete() {
        let item = TodoItem::new("Buy milk");
        assert_eq!(item.description, "Buy milk");
        assert!(!item.is_completed);
        assert!(!item.id.is_nil());
    }

    #[test]
    fn test_new_items_get_distinct_ids() {
        assert_ne!(TodoItem::new("a").id, TodoItem::new("a").id);
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let item = TodoItem::new("Walk the dog");
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["description"], "Walk the dog");
        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["id"], item.id.to_string());
    }

    #[test]
    fn test_missing_fields_default() {
        let item: TodoItem = serde_json::from_str(r#"{"description":"x"}"#).unwrap();
        assert!(item.id.is_nil());
        assert!(!item.is_completed);
    }

    #[test]
    fn test_description_key_folds_case() {
        assert_eq!(description_key("Buy MILK"), description_key("buy milk"));
        assert_eq!(description_key("ÉCOLE"), "école");
    }
}
