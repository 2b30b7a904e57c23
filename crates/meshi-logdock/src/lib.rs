//! Structured application logging with optional delivery to a LogDock
//! collector.
//!
//! [`Logger`] is the facade handed to the rest of the app. Every entry is
//! mirrored into `tracing`; when a collector is configured, entries at or
//! above the minimum level are also queued for a background task that
//! posts them to `{api_url}/logs`.

pub mod client;
pub mod entry;
pub mod error;
pub mod logger;

pub use client::LogdockClient;
pub use entry::{LogEntry, LogLevel};
pub use error::LogdockError;
pub use logger::{LogSink, Logger, LoggerHandle};
