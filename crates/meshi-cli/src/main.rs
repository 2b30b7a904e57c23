mod logtest;
mod places;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "meshi-cli")]
#[command(about = "meshi-share operator command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Insert the genre and price-range masters (existing rows are kept)
    Seed,
    /// Search restaurants through the Google Places API
    Search {
        /// Free-text query, e.g. "ramen shibuya"
        query: String,
        /// Maximum number of candidates to return
        #[arg(long, default_value_t = meshi_places::DEFAULT_MAX_RESULTS)]
        max: u32,
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Report stored places that look like a candidate
    CheckDuplicate {
        /// Google Maps link of the candidate (matched exactly)
        #[arg(long)]
        map_url: String,
        /// Name of the candidate (matched as a case-insensitive substring)
        #[arg(long, default_value = "")]
        name: String,
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Send one entry to LogDock and probe its health endpoint
    LogTest {
        /// Message to send
        #[arg(long, default_value = "meshi-cli log test")]
        message: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("meshi-cli ready; run with --help to list commands");
        return Ok(());
    };

    let config = meshi_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?command, env = %config.env, "running command");

    match command {
        Commands::Migrate => {
            let pool = connect(&config).await?;
            let applied = meshi_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
        }
        Commands::Seed => {
            let pool = connect(&config).await?;
            let summary = meshi_db::seed_masters(
                &pool,
                meshi_core::GENRE_MASTERS,
                meshi_core::PRICE_RANGE_MASTERS,
            )
            .await?;
            println!(
                "seeded {} genre(s), {} price range(s)",
                summary.genres_inserted, summary.price_ranges_inserted
            );
        }
        Commands::Search { query, max, json } => {
            places::run_search(&config, &query, max, json).await?;
        }
        Commands::CheckDuplicate {
            map_url,
            name,
            json,
        } => {
            let pool = connect(&config).await?;
            places::run_check_duplicate(&pool, &map_url, &name, json).await?;
        }
        Commands::LogTest { message } => {
            logtest::run_log_test(&config, &message).await?;
        }
    }

    Ok(())
}

async fn connect(config: &meshi_core::AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pool_config = meshi_db::PoolConfig::from_app_config(config);
    let pool = meshi_db::connect_pool(&config.database_url, pool_config).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests;
