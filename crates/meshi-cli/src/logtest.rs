use meshi_core::AppConfig;
use meshi_logdock::{LogEntry, LogdockClient};

/// Send a single info entry straight to LogDock, then probe `/health`.
///
/// Bypasses the background logger so delivery failures surface here.
///
/// # Errors
///
/// Returns an error if LogDock is not configured or rejects the entry.
pub(crate) async fn run_log_test(config: &AppConfig, message: &str) -> anyhow::Result<()> {
    let settings = config
        .logdock
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("LOGDOCK_API_URL and LOGDOCK_API_KEY must both be set"))?;
    let client = LogdockClient::new(settings, config.http_timeout_secs)?;

    let entry = LogEntry::info(message)
        .field("action", "log_test")
        .field("env", config.env.to_string());
    client.send(&entry).await?;
    println!("sent entry to {}", settings.api_url);

    if client.health().await? {
        println!("health: ok");
    } else {
        println!("health: unhealthy");
    }
    Ok(())
}
