//! # Item Errors

use thiserror::Error;
use uuid::Uuid;

/// Result type for item operations
pub type ItemResult<T> = Result<T, ItemError>;

/// Message for an empty description
pub const DESCRIPTION_REQUIRED: &str = "description required";

/// Message for a description already used by an incomplete item
pub const DESCRIPTION_EXISTS: &str = "description already exists";

/// Item errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// No item with the requested id
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    /// A business rule rejected the request
    #[error("{0}")]
    Validation(String),

    /// The store failed or returned something unreadable
    #[error("Store error: {0}")]
    Store(String),
}

impl ItemError {
    /// Validation failure for an empty description
    pub fn description_required() -> Self {
        ItemError::Validation(DESCRIPTION_REQUIRED.to_string())
    }

    /// Validation failure for a duplicate description
    pub fn description_exists() -> Self {
        ItemError::Validation(DESCRIPTION_EXISTS.to_string())
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ItemError::NotFound(_) => 404,
            ItemError::Validation(_) => 400,
            ItemError::Store(_) => 500,
        }
    }

    /// Whether this error is an expected, user-facing outcome
    pub fn is_expected(&self) -> bool {
        !matches!(self, ItemError::Store(_))
    }
}

impl From<sqlx::Error> for ItemError {
    fn from(err: sqlx::Error) -> Self {
        ItemError::Store(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for ItemError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        ItemError::Store(format!("migration failed: {}", err))
    }
}
