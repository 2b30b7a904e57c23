mod api;
mod messages;
mod middleware;
mod toasts;

use std::sync::Arc;
use std::time::Duration;

use meshi_logdock::{LogEntry, LogLevel, LogSink, LogdockClient, Logger, LoggerHandle};
use meshi_places::GooglePlacesClient;
use meshi_supabase::SupabaseClient;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    toasts::ToastSessions,
};

const LOG_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = meshi_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let (logger, log_handle) = build_logger(&config)?;
    let logger: Arc<dyn LogSink> = Arc::new(logger);

    let pool_config = meshi_db::PoolConfig::from_app_config(&config);
    let pool = meshi_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = meshi_db::run_migrations(&pool).await?;
    tracing::info!(applied, "migrations up to date");

    let places = match config.google_places_api_key.as_deref() {
        Some(key) => Some(Arc::new(GooglePlacesClient::new(
            key,
            config.http_timeout_secs,
        )?)),
        None => {
            tracing::warn!("GOOGLE_PLACES_API_KEY not set; place search is disabled");
            None
        }
    };
    let supabase = SupabaseClient::new(
        &config.supabase_url,
        &config.supabase_anon_key,
        config.http_timeout_secs,
    )?;

    let state = AppState {
        pool,
        places,
        supabase,
        toasts: ToastSessions::new(Arc::clone(&logger)),
        logger: Arc::clone(&logger),
        images_bucket: Arc::from(config.place_images_bucket.as_str()),
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    logger.log(
        LogEntry::info("Server started")
            .field("bindAddr", config.bind_addr.to_string())
            .field("env", config.env.to_string()),
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = log_handle {
        handle.shutdown(LOG_FLUSH_TIMEOUT).await;
    }
    Ok(())
}

/// Remote logging when a collector is configured, tracing only otherwise.
fn build_logger(
    config: &meshi_core::AppConfig,
) -> anyhow::Result<(Logger, Option<LoggerHandle>)> {
    let Some(settings) = config.logdock.as_ref() else {
        return Ok((Logger::tracing_only(), None));
    };
    let min_level: LogLevel = config.logdock_min_level.parse()?;
    let client = LogdockClient::new(settings, config.http_timeout_secs)?;
    let (logger, handle) = Logger::spawn(client, min_level);
    tracing::info!(api_url = %settings.api_url, %min_level, "remote logging enabled");
    Ok((logger, Some(handle)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
