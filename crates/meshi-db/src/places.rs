//! Database operations for the `places` table.

use chrono::{DateTime, Utc};
use meshi_core::{NewPlace, PlaceSummary};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A full row from the `places` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlaceRow {
    pub id: Uuid,
    pub place_id: String,
    pub name: String,
    pub map_url: String,
    pub address: String,
    pub genres: Vec<String>,
    pub price_range: Option<i16>,
    pub description: Option<String>,
    pub photos: Vec<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct PlaceSummaryRow {
    id: Uuid,
    name: String,
    map_url: String,
}

impl From<PlaceSummaryRow> for PlaceSummary {
    fn from(row: PlaceSummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            map_url: row.map_url,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Inserts a validated place and returns the stored row.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, including unique violations
/// on `place_id` (see [`DbError::is_unique_violation`]).
pub async fn create_place(pool: &PgPool, place: &NewPlace) -> Result<PlaceRow, DbError> {
    let row = sqlx::query_as::<_, PlaceRow>(
        "INSERT INTO places \
             (place_id, name, map_url, address, genres, price_range, description, photos, created_by) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING id, place_id, name, map_url, address, genres, price_range, description, \
                   photos, created_by, created_at, updated_at",
    )
    .bind(&place.place_id)
    .bind(&place.name)
    .bind(&place.map_url)
    .bind(&place.address)
    .bind(&place.genres)
    .bind(place.price_range)
    .bind(&place.description)
    .bind(&place.photos)
    .bind(place.created_by)
    .fetch_one(pool)
    .await?;

    tracing::debug!(id = %row.id, place_id = %row.place_id, "place inserted");
    Ok(row)
}

/// Returns a single place by id, or `None` if it does not exist.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_place(pool: &PgPool, id: Uuid) -> Result<Option<PlaceRow>, DbError> {
    let row = sqlx::query_as::<_, PlaceRow>(
        "SELECT id, place_id, name, map_url, address, genres, price_range, description, \
                photos, created_by, created_at, updated_at \
         FROM places \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns every place whose `map_url` equals `map_url` exactly (case-sensitive).
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_places_by_map_url(
    pool: &PgPool,
    map_url: &str,
) -> Result<Vec<PlaceSummary>, DbError> {
    let rows = sqlx::query_as::<_, PlaceSummaryRow>(
        "SELECT id, name, map_url \
         FROM places \
         WHERE map_url = $1 \
         ORDER BY created_at, id",
    )
    .bind(map_url)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(PlaceSummary::from).collect())
}

/// Returns up to `limit` places whose name contains `name`, ignoring case.
///
/// `%`, `_`, and `\` in `name` are matched literally.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_places_by_name_containing(
    pool: &PgPool,
    name: &str,
    limit: i64,
) -> Result<Vec<PlaceSummary>, DbError> {
    let pattern = format!("%{}%", escape_like(name));
    let rows = sqlx::query_as::<_, PlaceSummaryRow>(
        "SELECT id, name, map_url \
         FROM places \
         WHERE name ILIKE $1 ESCAPE '\\' \
         ORDER BY created_at, id \
         LIMIT $2",
    )
    .bind(pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(PlaceSummary::from).collect())
}

/// Escapes LIKE metacharacters so `value` is matched as a literal substring.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
