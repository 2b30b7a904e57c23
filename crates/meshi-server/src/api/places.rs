//! Place search, duplicate check, creation, and lookup handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use meshi_core::{DuplicateCheckResult, PlacePostInput};
use meshi_db::PlaceRow;
use meshi_logdock::LogEntry;
use meshi_places::{Place, DEFAULT_MAX_RESULTS};
use meshi_supabase::AuthUser;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::messages;
use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DuplicateQuery {
    #[serde(default)]
    pub map_url: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub(super) struct PlaceItem {
    id: Uuid,
    place_id: String,
    name: String,
    map_url: String,
    address: String,
    genres: Vec<String>,
    price_range: Option<i16>,
    description: Option<String>,
    photos: Vec<String>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PlaceRow> for PlaceItem {
    fn from(row: PlaceRow) -> Self {
        Self {
            id: row.id,
            place_id: row.place_id,
            name: row.name,
            map_url: row.map_url,
            address: row.address,
            genres: row.genres,
            price_range: row.price_range,
            description: row.description,
            photos: row.photos,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Log entry for a create attempt, carrying the fields every outcome shares.
fn create_log(entry: LogEntry, user: &AuthUser) -> LogEntry {
    entry
        .user(user.id)
        .field(
            "userName",
            user.full_name.clone().unwrap_or_else(|| "Unknown".to_owned()),
        )
        .field("action", "create_place")
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/places/search?q=: Look a restaurant up by free text.
pub(super) async fn search_places(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<Place>>>, ApiError> {
    let toasts = state.toasts.for_user(user.id);

    let q = query.q.trim();
    if q.is_empty() {
        toasts.error(messages::SEARCH_QUERY_REQUIRED);
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "search query is required",
        ));
    }

    let Some(client) = state.places.as_ref() else {
        toasts.error(messages::SEARCH_FAILED);
        return Err(ApiError::new(
            req_id.0,
            "unavailable",
            "place search is not configured",
        ));
    };

    match client.search_text(q, DEFAULT_MAX_RESULTS).await {
        Ok(places) => {
            if places.is_empty() {
                toasts.info(messages::SEARCH_NO_RESULTS);
            } else {
                toasts.success(messages::search_results_found(places.len()));
            }
            Ok(Json(ApiResponse {
                data: places,
                meta: ResponseMeta::new(req_id.0),
            }))
        }
        Err(e) => {
            state.logger.log(
                LogEntry::error("Place search failed")
                    .user(user.id)
                    .field("action", "search_place")
                    .field("result", "error")
                    .field("errorMessage", e.to_string()),
            );
            toasts.error(messages::SEARCH_FAILED);
            Err(ApiError::new(
                req_id.0,
                "unavailable",
                "place search failed",
            ))
        }
    }
}

/// GET /api/v1/places/duplicates?map_url=&name=: Report stored places that
/// look like the candidate.
pub(super) async fn check_duplicates(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DuplicateQuery>,
) -> Result<Json<ApiResponse<DuplicateCheckResult>>, ApiError> {
    let map_url = query.map_url.trim();
    if map_url.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "map_url is required",
        ));
    }

    let result = meshi_db::check_duplicate(&state.pool, map_url, query.name.trim())
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/places: Validate and store a new place.
pub(super) async fn create_place(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<PlacePostInput>,
) -> Result<(StatusCode, Json<ApiResponse<PlaceItem>>), ApiError> {
    let rid = req_id.0;
    let toasts = state.toasts.for_user(user.id);

    let new_place = match body.validate(user.id) {
        Ok(place) => place,
        Err(errors) => {
            let details = serde_json::to_value(&errors).unwrap_or_default();
            state.logger.log(
                create_log(
                    LogEntry::warn("Place creation failed - validation error"),
                    &user,
                )
                .field("result", "error")
                .field("errorType", "validation")
                .field("validationErrors", details.clone()),
            );
            toasts.error(messages::VALIDATION_FAILED);
            return Err(ApiError::new(rid, "validation_error", errors.to_string())
                .with_details(details));
        }
    };

    match meshi_db::create_place(&state.pool, &new_place).await {
        Ok(row) => {
            state.logger.log(
                create_log(LogEntry::info("Place created successfully"), &user)
                    .field("result", "success")
                    .field("placeId", row.id.to_string())
                    .field("placeName", row.name.clone())
                    .field("googlePlaceId", row.place_id.clone()),
            );
            toasts.success(messages::PLACE_CREATED);
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: PlaceItem::from(row),
                    meta: ResponseMeta::new(rid),
                }),
            ))
        }
        Err(e) if e.is_unique_violation() => {
            state.logger.log(
                create_log(LogEntry::warn("Place creation failed - duplicate"), &user)
                    .field("result", "error")
                    .field("errorType", "duplicate")
                    .field("googlePlaceId", new_place.place_id.clone()),
            );
            toasts.error(messages::PLACE_ALREADY_EXISTS);
            Err(ApiError::new(
                rid,
                "conflict",
                "this place is already registered",
            ))
        }
        Err(e) => {
            state.logger.log(
                create_log(
                    LogEntry::error("Place creation failed - database error"),
                    &user,
                )
                .field("result", "error")
                .field("errorType", "database")
                .field("errorMessage", e.to_string())
                .field("googlePlaceId", new_place.place_id.clone()),
            );
            toasts.error(messages::CREATE_FAILED);
            Err(map_db_error(rid, &e))
        }
    }
}

/// GET /api/v1/places/{id}
pub(super) async fn get_place(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PlaceItem>>, ApiError> {
    let row = meshi_db::get_place(&state.pool, id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?
        .ok_or_else(|| ApiError::new(req_id.0.clone(), "not_found", format!("place {id} not found")))?;

    Ok(Json(ApiResponse {
        data: PlaceItem::from(row),
        meta: ResponseMeta::new(req_id.0),
    }))
}
