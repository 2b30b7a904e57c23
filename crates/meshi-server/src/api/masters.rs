use axum::{extract::State, Extension, Json};
use meshi_db::{GenreMasterRow, PriceRangeMasterRow};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct MastersData {
    genres: Vec<GenreMasterRow>,
    price_ranges: Vec<PriceRangeMasterRow>,
}

/// GET /api/v1/masters: Active genres and price ranges for the post form.
pub(super) async fn get_masters(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<MastersData>>, ApiError> {
    let (genres, price_ranges) = tokio::try_join!(
        meshi_db::list_genre_masters(&state.pool),
        meshi_db::list_price_range_masters(&state.pool),
    )
    .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: MastersData {
            genres,
            price_ranges,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
