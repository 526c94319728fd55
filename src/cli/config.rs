//! Configuration file
//!
//! A JSON document whose fields all have defaults, so a missing file is the
//! same as `{}`. `DATABASE_URL` in the environment (or `.env`) replaces
//! `database_url`.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::{LogFormat, DEFAULT_LOG_FILTER};

/// `database_url` value selecting the non-durable in-process store
pub const MEMORY_STORE: &str = "memory";

/// Environment variable overriding `database_url`
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite URL, or "memory" (default: "sqlite://todolist.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Connection pool size (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// tracing filter directives (default: "todolist=info,tower_http=info")
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// "text" or "json" (default: "text")
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_database_url() -> String {
    "sqlite://todolist.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            http: HttpServerConfig::default(),
            log_filter: default_log_filter(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, apply environment overrides, validate
    pub fn load(path: &Path) -> CliResult<Self> {
        let config = Self::from_file(path)?.with_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse the file at `path`; a missing file yields defaults
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(CliError::config_error(format!(
                    "Failed to read config {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Replace fields that have an environment override
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.database_url = url;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.database_url.trim().is_empty() {
            return Err(CliError::config_error("database_url must not be empty"));
        }

        if self.max_connections == 0 {
            return Err(CliError::config_error("max_connections must be > 0"));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        Ok(())
    }

    /// Whether the in-process store is selected
    pub fn uses_memory_store(&self) -> bool {
        self.database_url == MEMORY_STORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_file(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todolist.json");
        fs::write(
            &path,
            r#"{"database_url": "memory", "http": {"port": 8080}, "log_format": "json"}"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.uses_memory_store());
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todolist.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_unreadable_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();

        let err = Config::from_file(temp_dir.path()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
        assert_eq!(err.code_str(), "TODOLIST_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("todolist.json");
        fs::write(&path, r#"{"log_format": "xml"}"#).unwrap();

        assert!(Config::from_file(&path).is_err());
    }

    #[test]
    fn test_env_override() {
        let config = Config::default().with_env_overrides(|key| match key {
            DATABASE_URL_ENV => Some("sqlite://other.db".to_string()),
            _ => None,
        });
        assert_eq!(config.database_url, "sqlite://other.db");

        let untouched = Config::default().with_env_overrides(|_| Some(String::new()));
        assert_eq!(untouched.database_url, "sqlite://todolist.db");
    }

    #[test]
    fn test_validation() {
        assert!(Config::default().validate().is_ok());

        let mut config = Config::default();
        config.max_connections = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database_url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.host = "localhost".to_string();
        assert!(config.validate().is_ok());
    }
}
