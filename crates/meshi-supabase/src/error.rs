use thiserror::Error;

/// Errors returned by the Supabase client.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The access token was missing, expired, or rejected (401/403).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-2xx answer.
    #[error("Supabase API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured project URL could not be parsed.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
