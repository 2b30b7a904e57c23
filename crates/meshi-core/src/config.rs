use crate::app_config::{AppConfig, Environment, LogdockSettings};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = require("DATABASE_URL")?;
    let supabase_url = require("SUPABASE_URL")?;
    let supabase_anon_key = require("SUPABASE_ANON_KEY")?;

    let env = parse_environment(&or_default("MESHI_ENV", "development"))?;

    let bind_addr = parse_addr("MESHI_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("MESHI_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("MESHI_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("MESHI_DB_MIN_CONNECTIONS", "1")?;
    if db_min_connections > db_max_connections {
        return Err(ConfigError::InvalidEnvVar {
            var: "MESHI_DB_MIN_CONNECTIONS".to_string(),
            reason: format!(
                "min connections ({db_min_connections}) exceeds max connections ({db_max_connections})"
            ),
        });
    }
    let db_acquire_timeout_secs = parse_u64("MESHI_DB_ACQUIRE_TIMEOUT_SECS", "10")?;
    let http_timeout_secs = parse_u64("MESHI_HTTP_TIMEOUT_SECS", "15")?;

    let google_places_api_key = optional("GOOGLE_PLACES_API_KEY");
    let place_images_bucket = or_default("MESHI_PLACE_IMAGES_BUCKET", "place-images");

    let logdock = match (optional("LOGDOCK_API_URL"), optional("LOGDOCK_API_KEY")) {
        (Some(api_url), Some(api_key)) => Some(LogdockSettings {
            api_url,
            api_key,
            cf_access_client_id: optional("CF_ACCESS_CLIENT_ID"),
            cf_access_client_secret: optional("CF_ACCESS_CLIENT_SECRET"),
        }),
        _ => None,
    };
    let logdock_min_level = parse_log_level(
        "LOGDOCK_MIN_LEVEL",
        &or_default("LOGDOCK_MIN_LEVEL", env.default_log_floor()),
    )?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        http_timeout_secs,
        google_places_api_key,
        supabase_url,
        supabase_anon_key,
        place_images_bucket,
        logdock,
        logdock_min_level,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MESHI_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

fn parse_log_level(var: &str, raw: &str) -> Result<String, ConfigError> {
    let level = raw.trim().to_ascii_lowercase();
    match level.as_str() {
        "debug" | "info" | "warn" | "error" => Ok(level),
        _ => Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected debug, info, warn, or error; got '{raw}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
