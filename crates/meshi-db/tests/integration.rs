//! Offline unit tests for meshi-db pool configuration and row types.
//! These tests do not require a live database connection.

use meshi_core::{AppConfig, Environment};
use meshi_db::{PlaceRow, PoolConfig, SeedSummary};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        http_timeout_secs: 15,
        google_places_api_key: None,
        supabase_url: "https://project.supabase.co".to_string(),
        supabase_anon_key: "anon".to_string(),
        place_images_bucket: "place-images".to_string(),
        logdock: None,
        logdock_min_level: "info".to_string(),
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`PlaceRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn place_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let now = Utc::now();
    let row = PlaceRow {
        id: Uuid::nil(),
        place_id: "ChIJ123".to_string(),
        name: "Ramen Taro".to_string(),
        map_url: "https://maps.app.goo.gl/abc".to_string(),
        address: "Shibuya, Tokyo".to_string(),
        genres: vec!["ramen".to_string()],
        price_range: Some(2),
        description: None,
        photos: vec![],
        created_by: Uuid::nil(),
        created_at: now,
        updated_at: now,
    };

    assert_eq!(row.price_range, Some(2));
    assert!(row.photos.is_empty());
}

#[test]
fn seed_summary_defaults_to_zero() {
    let summary = SeedSummary::default();
    assert_eq!(summary.genres_inserted, 0);
    assert_eq!(summary.price_ranges_inserted, 0);
}
