//! todolist - a small todo-list REST API backed by SQLite
//!
//! Layers, outermost first:
//! - [`http_server`]: Axum routes mapping requests to service calls
//! - [`items`]: validation service and persistence gateways
//! - [`cli`]: configuration, logging setup, and process lifecycle

pub mod cli;
pub mod http_server;
pub mod items;
pub mod observability;
