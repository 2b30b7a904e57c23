//! Read access to the genre and price-range master tables.

use serde::Serialize;
use sqlx::PgPool;

use crate::DbError;

/// An active genre, as offered in the post form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct GenreMasterRow {
    pub value: String,
    pub label: String,
    pub display_order: i32,
}

/// An active price range, as offered in the post form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct PriceRangeMasterRow {
    pub value: i16,
    pub label: String,
    pub description: Option<String>,
    pub display_order: i32,
}

/// Returns active genres ordered by `display_order`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_genre_masters(pool: &PgPool) -> Result<Vec<GenreMasterRow>, DbError> {
    let rows = sqlx::query_as::<_, GenreMasterRow>(
        "SELECT value, label, display_order \
         FROM genre_masters \
         WHERE is_active = true \
         ORDER BY display_order, value",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns active price ranges ordered by `display_order`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_price_range_masters(pool: &PgPool) -> Result<Vec<PriceRangeMasterRow>, DbError> {
    let rows = sqlx::query_as::<_, PriceRangeMasterRow>(
        "SELECT value, label, description, display_order \
         FROM price_range_masters \
         WHERE is_active = true \
         ORDER BY display_order, value",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
