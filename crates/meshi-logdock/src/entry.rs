use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::LogdockError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogdockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LogdockError::UnknownLevel(other.to_owned())),
        }
    }
}

/// One application log record.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub user_id: Option<String>,
    pub metadata: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    #[must_use]
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            user_id: None,
            metadata: Map::new(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Debug, message)
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    #[must_use]
    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    #[must_use]
    pub fn user(mut self, user_id: impl fmt::Display) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    /// Adds one metadata field, replacing any previous value for `key`.
    #[must_use]
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_owned(), value.into());
        self
    }
}

/// Wire body for `POST /logs`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LogPayload<'a> {
    pub app: &'a str,
    pub level: LogLevel,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    pub metadata: &'a Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl<'a> LogPayload<'a> {
    pub fn new(app: &'a str, entry: &'a LogEntry) -> Self {
        Self {
            app,
            level: entry.level,
            message: &entry.message,
            user_id: entry.user_id.as_deref(),
            metadata: &entry.metadata,
            timestamp: entry.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_severity() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("WARN".parse::<LogLevel>().expect("level"), LogLevel::Warn);
        assert_eq!(" info ".parse::<LogLevel>().expect("level"), LogLevel::Info);
        assert!(matches!(
            "verbose".parse::<LogLevel>(),
            Err(LogdockError::UnknownLevel(_))
        ));
    }

    #[test]
    fn payload_uses_camel_case_and_skips_missing_user() {
        let entry = LogEntry::info("place created").field("action", "create_place");
        let json = serde_json::to_value(LogPayload::new("meshi-share", &entry)).expect("json");

        assert_eq!(json["app"], "meshi-share");
        assert_eq!(json["level"], "info");
        assert_eq!(json["metadata"]["action"], "create_place");
        assert!(json.get("userId").is_none());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn user_is_rendered_as_user_id() {
        let entry = LogEntry::error("boom").user(42);
        let json = serde_json::to_value(LogPayload::new("meshi-share", &entry)).expect("json");
        assert_eq!(json["userId"], "42");
    }
}
