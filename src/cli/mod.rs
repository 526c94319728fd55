//! CLI module for todolist
//!
//! Provides command-line interface for:
//! - init: Create the database and apply the schema
//! - serve: Boot the store and serve the REST API

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, open_store, run, run_command, serve, Store};
pub use config::{Config, DATABASE_URL_ENV, MEMORY_STORE};
pub use errors::{CliError, CliResult};
