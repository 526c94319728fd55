//! # HTTP Server Module
//!
//! REST API over the item service, built on Axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/items` - List and create items
//! - `/items/{id}` - Fetch and complete one item
//! - `/api/TodoItems/*` - Same item routes, for the React page

pub mod config;
pub mod errors;
pub mod item_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use item_routes::{item_routes, ItemState};
pub use server::{shutdown_signal, HttpServer};
