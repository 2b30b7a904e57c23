//! Duplicate-place detection for the post form.
//!
//! A candidate is compared against stored places twice: once by exact map
//! link and once by case-insensitive name containment. The two result sets
//! are merged by place id with exact matches first.

use std::future::Future;

use meshi_core::{places::DUPLICATE_NAME_MATCH_LIMIT, DuplicateCheckResult, PlaceSummary};
use sqlx::PgPool;

use crate::{places, DbError};

/// Read access to stored places needed by [`check_duplicate`].
pub trait PlaceLookup {
    /// Places whose map link equals `map_url` exactly.
    fn find_by_map_url(
        &self,
        map_url: &str,
    ) -> impl Future<Output = Result<Vec<PlaceSummary>, DbError>> + Send;

    /// At most `limit` places whose name contains `name`, ignoring case.
    fn find_by_name_containing(
        &self,
        name: &str,
        limit: i64,
    ) -> impl Future<Output = Result<Vec<PlaceSummary>, DbError>> + Send;
}

impl PlaceLookup for PgPool {
    async fn find_by_map_url(&self, map_url: &str) -> Result<Vec<PlaceSummary>, DbError> {
        places::find_places_by_map_url(self, map_url).await
    }

    async fn find_by_name_containing(
        &self,
        name: &str,
        limit: i64,
    ) -> Result<Vec<PlaceSummary>, DbError> {
        places::find_places_by_name_containing(self, name, limit).await
    }
}

/// Check whether a candidate place already exists.
///
/// Runs the exact map-link lookup, then the name lookup capped at
/// [`DUPLICATE_NAME_MATCH_LIMIT`]. Neither lookup is retried.
///
/// # Errors
///
/// Returns the first [`DbError`] raised by either lookup.
pub async fn check_duplicate<S>(
    store: &S,
    map_url: &str,
    name: &str,
) -> Result<DuplicateCheckResult, DbError>
where
    S: PlaceLookup + Sync,
{
    let exact = store.find_by_map_url(map_url).await?;
    let similar = store
        .find_by_name_containing(name, DUPLICATE_NAME_MATCH_LIMIT)
        .await?;

    let exact_count = exact.len();
    let similar_count = similar.len();
    let result = DuplicateCheckResult::merge(exact, similar);

    tracing::debug!(
        exact_count,
        similar_count,
        duplicate_count = result.duplicates.len(),
        "duplicate check complete"
    );
    Ok(result)
}
