//! CLI-specific error types
//!
//! Every CLI error is fatal: it is printed to stderr and the process exits 1.

use thiserror::Error;

use crate::items::ItemError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing fields, unreadable, or invalid
    #[error("TODOLIST_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Runtime, store, or server failed to come up
    #[error("TODOLIST_CLI_BOOT_FAILED: {0}")]
    BootFailed(String),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Boot failed
    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::BootFailed(msg.into())
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        match self {
            Self::Config(_) => "TODOLIST_CLI_CONFIG_ERROR",
            Self::BootFailed(_) => "TODOLIST_CLI_BOOT_FAILED",
        }
    }
}

impl From<ItemError> for CliError {
    fn from(e: ItemError) -> Self {
        Self::BootFailed(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
