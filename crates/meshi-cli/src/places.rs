//! Place search and duplicate-check commands.

use meshi_core::AppConfig;
use meshi_places::GooglePlacesClient;

/// Truncate `value` to `max` characters, marking the cut with `...`.
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        format!("{}...", value.chars().take(max).collect::<String>())
    } else {
        value.to_owned()
    }
}

/// Run a text search and print the candidates.
///
/// # Errors
///
/// Returns an error if no API key is configured or the request fails.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    max: u32,
    json: bool,
) -> anyhow::Result<()> {
    let query = query.trim();
    anyhow::ensure!(!query.is_empty(), "search query must not be empty");
    let api_key = config
        .google_places_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("GOOGLE_PLACES_API_KEY is not set"))?;

    let client = GooglePlacesClient::new(api_key, config.http_timeout_secs)?;
    let places = client.search_text(query, max).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&places)?);
        return Ok(());
    }
    if places.is_empty() {
        println!("no places found for '{query}'");
        return Ok(());
    }

    println!("{:<30}{:<32}ADDRESS", "PLACE ID", "NAME");
    for place in &places {
        println!(
            "{:<30}{:<32}{}",
            truncate(&place.id, 27),
            truncate(&place.display_name.text, 28),
            place.formatted_address
        );
    }
    Ok(())
}

/// Run the duplicate detector against the database and print the matches.
///
/// # Errors
///
/// Returns an error if `map_url` is blank or a query fails.
pub(crate) async fn run_check_duplicate(
    pool: &sqlx::PgPool,
    map_url: &str,
    name: &str,
    json: bool,
) -> anyhow::Result<()> {
    let map_url = map_url.trim();
    anyhow::ensure!(!map_url.is_empty(), "--map-url must not be empty");

    let result = meshi_db::check_duplicate(pool, map_url, name.trim()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    if !result.has_duplicate {
        println!("no duplicates found");
        return Ok(());
    }

    println!("{:<38}{:<32}MAP URL", "ID", "NAME");
    for place in &result.duplicates {
        println!(
            "{:<38}{:<32}{}",
            place.id,
            truncate(&place.name, 28),
            place.map_url
        );
    }
    Ok(())
}
