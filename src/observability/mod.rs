//! Observability for the todo API
//!
//! Logging is built on `tracing`; see [`logging`] for subscriber setup.

pub mod logging;

pub use logging::{init_logging, LogFormat, DEFAULT_LOG_FILTER};
