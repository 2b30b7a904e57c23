use thiserror::Error;

/// Errors returned by the LogDock client.
#[derive(Debug, Error)]
pub enum LogdockError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The collector answered with a non-2xx status.
    #[error("log entry rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The configured collector URL could not be parsed.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The minimum level string is not one of debug, info, warn, error.
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
}
