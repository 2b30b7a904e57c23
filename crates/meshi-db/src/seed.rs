use meshi_core::{GenreSeed, PriceRangeSeed};
use sqlx::PgPool;

use crate::DbError;

/// Rows inserted by [`seed_masters`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub genres_inserted: u64,
    pub price_ranges_inserted: u64,
}

/// Insert the genre and price-range masters that do not exist yet.
///
/// Existing rows are left untouched so hand-edited labels survive a reseed.
/// Both tables are written inside a single transaction; if any insert fails
/// the whole batch is rolled back.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any database operation fails.
pub async fn seed_masters(
    pool: &PgPool,
    genres: &[GenreSeed],
    price_ranges: &[PriceRangeSeed],
) -> Result<SeedSummary, DbError> {
    let mut tx = pool.begin().await?;
    let mut summary = SeedSummary::default();

    for genre in genres {
        let result = sqlx::query(
            "INSERT INTO genre_masters (value, label, display_order) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (value) DO NOTHING",
        )
        .bind(genre.value)
        .bind(genre.label)
        .bind(genre.display_order)
        .execute(&mut *tx)
        .await?;
        summary.genres_inserted += result.rows_affected();
    }

    for price_range in price_ranges {
        let result = sqlx::query(
            "INSERT INTO price_range_masters (value, label, description, display_order) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (value) DO NOTHING",
        )
        .bind(price_range.value)
        .bind(price_range.label)
        .bind(price_range.description)
        .bind(price_range.display_order)
        .execute(&mut *tx)
        .await?;
        summary.price_ranges_inserted += result.rows_affected();
    }

    tx.commit().await?;

    tracing::info!(
        genres_inserted = summary.genres_inserted,
        price_ranges_inserted = summary.price_ranges_inserted,
        "master seed complete"
    );
    Ok(summary)
}
