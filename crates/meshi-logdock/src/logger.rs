//! The application-facing logger and its background delivery task.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::client::LogdockClient;
use crate::entry::{LogEntry, LogLevel};

/// Anything that accepts application log entries.
///
/// Components take an `Arc<dyn LogSink>` so tests can substitute a
/// recording sink for the real [`Logger`].
pub trait LogSink: Send + Sync {
    fn log(&self, entry: LogEntry);

    fn debug(&self, message: &str) {
        self.log(LogEntry::debug(message));
    }

    fn info(&self, message: &str) {
        self.log(LogEntry::info(message));
    }

    fn warn(&self, message: &str) {
        self.log(LogEntry::warn(message));
    }

    fn error(&self, message: &str) {
        self.log(LogEntry::error(message));
    }
}

/// Logging facade: mirrors to `tracing` and forwards to LogDock when enabled.
///
/// Cloning is cheap; all clones feed the same delivery task.
#[derive(Debug, Clone)]
pub struct Logger {
    remote: Option<mpsc::UnboundedSender<LogEntry>>,
    min_level: LogLevel,
}

/// Owner of the delivery task, used to drain queued entries at shutdown.
#[derive(Debug)]
pub struct LoggerHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl Logger {
    /// A logger that only writes to `tracing`.
    #[must_use]
    pub fn tracing_only() -> Self {
        Self {
            remote: None,
            min_level: LogLevel::Debug,
        }
    }

    /// Starts the delivery task and returns the logger feeding it.
    ///
    /// Entries below `min_level` still reach `tracing` but are not sent.
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn spawn(client: LogdockClient, min_level: LogLevel) -> (Self, LoggerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(deliver(client, rx, shutdown_rx));

        let logger = Self {
            remote: Some(tx),
            min_level,
        };
        let handle = LoggerHandle {
            shutdown: shutdown_tx,
            task,
        };
        (logger, handle)
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl LogSink for Logger {
    fn log(&self, entry: LogEntry) {
        mirror_to_tracing(&entry);

        if entry.level < self.min_level {
            return;
        }
        if let Some(tx) = &self.remote {
            if tx.send(entry).is_err() {
                tracing::debug!("log delivery task stopped; entry not forwarded");
            }
        }
    }
}

impl LoggerHandle {
    /// Stops accepting new entries and waits up to `timeout` for queued
    /// entries to be delivered.
    pub async fn shutdown(self, timeout: Duration) {
        if self.shutdown.send(()).is_err() {
            tracing::debug!("log delivery task already finished");
        }

        match tokio::time::timeout(timeout, self.task).await {
            Ok(Ok(())) => tracing::debug!("log delivery drained"),
            Ok(Err(e)) => tracing::warn!(error = %e, "log delivery task failed"),
            Err(_) => tracing::warn!(
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "log delivery did not drain before timeout"
            ),
        }
    }
}

async fn deliver(
    client: LogdockClient,
    mut rx: mpsc::UnboundedReceiver<LogEntry>,
    mut shutdown: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            entry = rx.recv() => match entry {
                Some(entry) => send_one(&client, &entry).await,
                None => return,
            },
            _ = &mut shutdown => break,
        }
    }

    rx.close();
    while let Some(entry) = rx.recv().await {
        send_one(&client, &entry).await;
    }
}

async fn send_one(client: &LogdockClient, entry: &LogEntry) {
    // Delivery failures go to tracing only; routing them back through the
    // logger would loop.
    if let Err(e) = client.send(entry).await {
        tracing::warn!(error = %e, level = %entry.level, "failed to deliver log entry");
    }
}

fn mirror_to_tracing(entry: &LogEntry) {
    let user_id = entry.user_id.as_deref().unwrap_or("-");
    let metadata = &entry.metadata;
    match entry.level {
        LogLevel::Debug => tracing::debug!(user_id, ?metadata, "{}", entry.message),
        LogLevel::Info => tracing::info!(user_id, ?metadata, "{}", entry.message),
        LogLevel::Warn => tracing::warn!(user_id, ?metadata, "{}", entry.message),
        LogLevel::Error => tracing::error!(user_id, ?metadata, "{}", entry.message),
    }
}
