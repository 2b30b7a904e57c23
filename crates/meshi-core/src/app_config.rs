use std::net::SocketAddr;

/// Application name reported to the remote log service.
pub const APP_NAME: &str = "meshi-share";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Minimum remote log level when `LOGDOCK_MIN_LEVEL` is not set.
    #[must_use]
    pub fn default_log_floor(&self) -> &'static str {
        match self {
            Environment::Development | Environment::Test => "debug",
            Environment::Production => "info",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Remote log delivery settings. Present only when both URL and key are set.
#[derive(Clone)]
pub struct LogdockSettings {
    pub api_url: String,
    pub api_key: String,
    pub cf_access_client_id: Option<String>,
    pub cf_access_client_secret: Option<String>,
}

impl std::fmt::Debug for LogdockSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogdockSettings")
            .field("api_url", &self.api_url)
            .field("api_key", &"[redacted]")
            .field("cf_access_client_id", &self.cf_access_client_id)
            .field(
                "cf_access_client_secret",
                &self.cf_access_client_secret.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub http_timeout_secs: u64,
    pub google_places_api_key: Option<String>,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub place_images_bucket: String,
    pub logdock: Option<LogdockSettings>,
    pub logdock_min_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field(
                "google_places_api_key",
                &self.google_places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &"[redacted]")
            .field("place_images_bucket", &self.place_images_bucket)
            .field("logdock", &self.logdock)
            .field("logdock_min_level", &self.logdock_min_level)
            .finish()
    }
}
