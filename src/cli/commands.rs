//! CLI command implementations
//!
//! Each command loads configuration, installs logging, opens the store, and
//! then does its work on a fresh tokio runtime.

use std::path::Path;
use std::sync::Arc;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::{shutdown_signal, HttpServer, ItemState};
use crate::items::{
    InMemoryItemRepository, ItemRepository, SqliteItemRepository, TodoItemService,
};
use crate::observability::init_logging;

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config } => init(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Create the database file and apply the schema.
///
/// Safe to run repeatedly; migrations already applied are skipped.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    install_logging(&config)?;

    if config.uses_memory_store() {
        return Err(CliError::config_error(
            "database_url is 'memory'; there is no database to initialize",
        ));
    }

    let rt = build_runtime()?;
    rt.block_on(async {
        let repo =
            SqliteItemRepository::connect(&config.database_url, config.max_connections).await?;
        repo.close().await;
        tracing::info!(event = "DATABASE_INITIALIZED", database_url = %config.database_url);
        Ok::<(), CliError>(())
    })
}

/// Boot the store and serve HTTP until a shutdown signal arrives
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }
    install_logging(&config)?;

    let rt = build_runtime()?;
    rt.block_on(async {
        let store = open_store(&config).await?;
        let service: ItemState = Arc::new(TodoItemService::new(store.repository()));

        let server = HttpServer::with_config(config.http.clone(), service);
        let result = server.start(shutdown_signal()).await;

        store.close().await;
        result.map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// The store selected by configuration
#[derive(Debug)]
pub enum Store {
    Sqlite(Arc<SqliteItemRepository>),
    Memory(Arc<InMemoryItemRepository>),
}

impl Store {
    /// The store as a repository trait object
    pub fn repository(&self) -> Arc<dyn ItemRepository> {
        match self {
            Store::Sqlite(repo) => repo.clone() as Arc<dyn ItemRepository>,
            Store::Memory(repo) => repo.clone() as Arc<dyn ItemRepository>,
        }
    }

    /// Release store resources
    pub async fn close(&self) {
        if let Store::Sqlite(repo) = self {
            repo.close().await;
        }
    }
}

/// Open the store named by `config.database_url`
pub async fn open_store(config: &Config) -> CliResult<Store> {
    if config.uses_memory_store() {
        tracing::warn!(event = "MEMORY_STORE_SELECTED", "items will not survive a restart");
        return Ok(Store::Memory(Arc::new(InMemoryItemRepository::new())));
    }

    let repo = SqliteItemRepository::connect(&config.database_url, config.max_connections).await?;
    tracing::info!(event = "STORE_OPENED", database_url = %config.database_url);
    Ok(Store::Sqlite(Arc::new(repo)))
}

fn install_logging(config: &Config) -> CliResult<()> {
    init_logging(&config.log_filter, config.log_format).map_err(CliError::config_error)
}

fn build_runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::TodoItem;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_memory_store() {
        let mut config = Config::default();
        config.database_url = "memory".to_string();

        let store = open_store(&config).await.unwrap();
        assert!(matches!(store, Store::Memory(_)));
    }

    #[tokio::test]
    async fn test_open_sqlite_store_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("todo.db");
        let mut config = Config::default();
        config.database_url = format!("sqlite://{}", db_path.display());

        let store = open_store(&config).await.unwrap();
        let item = TodoItem::new("Stored");
        store.repository().insert(&item).await.unwrap();
        store.close().await;

        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_open_store_bad_url_fails_boot() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.database_url = format!(
            "sqlite://{}",
            temp_dir.path().join("missing").join("dir").join("todo.db").display()
        );

        let err = open_store(&config).await.unwrap_err();
        assert!(matches!(err, CliError::BootFailed(_)));
    }
}
