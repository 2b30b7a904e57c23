//! Place image upload and removal, backed by Supabase storage.

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Extension, Json,
};
use meshi_logdock::LogEntry;
use meshi_supabase::{AuthUser, SupabaseError};
use serde::{Deserialize, Serialize};

use crate::messages;
use crate::middleware::{AccessToken, RequestId};

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct UploadQuery {
    /// Photos already attached to the place in the caller's form.
    #[serde(default)]
    pub existing: usize,
}

#[derive(Debug, Deserialize)]
pub(super) struct DeleteQuery {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Serialize)]
pub(super) struct UploadedImage {
    path: String,
    url: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DeletedImage {
    path: String,
}

/// Place keys become the first storage path segment; restrict them to the
/// characters Google place ids and provisional ids use.
fn is_valid_place_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 256
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Object paths must be `{place_key}/{file}` with no traversal segments.
fn is_valid_object_path(path: &str) -> bool {
    match path.split_once('/') {
        Some((key, file)) => {
            is_valid_place_key(key)
                && !file.is_empty()
                && !file.contains('/')
                && file != "."
                && file != ".."
        }
        None => false,
    }
}

fn storage_error(req_id: String, error: &SupabaseError) -> ApiError {
    match error {
        SupabaseError::Unauthorized(_) => {
            ApiError::new(req_id, "unauthorized", "storage rejected the access token")
        }
        _ => ApiError::new(req_id, "unavailable", "image storage request failed"),
    }
}

/// POST /api/v1/places/{place_key}/images?existing=N: Store one image.
///
/// The body is the raw image; its type comes from `Content-Type`.
#[allow(clippy::too_many_arguments)]
pub(super) async fn upload_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Extension(token): Extension<AccessToken>,
    Path(place_key): Path<String>,
    Query(query): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<ApiResponse<UploadedImage>>), ApiError> {
    let toasts = state.toasts.for_user(user.id);

    if !is_valid_place_key(&place_key) {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "place key may only contain letters, digits, '-' and '_'",
        ));
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let upload = match meshi_core::validate_image_upload(body.len(), content_type, query.existing)
    {
        Ok(upload) => upload,
        Err(errors) => {
            toasts.error(errors.to_string());
            let details = serde_json::to_value(&errors).unwrap_or_default();
            return Err(
                ApiError::new(req_id.0, "validation_error", errors.to_string())
                    .with_details(details),
            );
        }
    };

    let key = meshi_supabase::place_image_key(&place_key, upload.extension);
    let stored = state
        .supabase
        .upload_object(
            &token.0,
            &state.images_bucket,
            &key,
            body.to_vec(),
            upload.content_type,
        )
        .await;

    match stored {
        Ok(path) => {
            let url = state.supabase.public_url(&state.images_bucket, &path);
            toasts.success(messages::images_uploaded(1));
            Ok((
                StatusCode::CREATED,
                Json(ApiResponse {
                    data: UploadedImage { path, url },
                    meta: ResponseMeta::new(req_id.0),
                }),
            ))
        }
        Err(e) => {
            state.logger.log(
                LogEntry::error("Image upload failed")
                    .user(user.id)
                    .field("action", "upload_image")
                    .field("result", "error")
                    .field("path", key)
                    .field("errorMessage", e.to_string()),
            );
            toasts.error(messages::UPLOAD_FAILED);
            Err(storage_error(req_id.0, &e))
        }
    }
}

/// DELETE /api/v1/images?path=: Remove a previously uploaded image.
pub(super) async fn delete_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<ApiResponse<DeletedImage>>, ApiError> {
    let toasts = state.toasts.for_user(user.id);

    let path = query.path.trim().to_owned();
    if !is_valid_object_path(&path) {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "path must look like '{place_key}/{file}'",
        ));
    }

    let paths = [path];
    if let Err(e) = state
        .supabase
        .delete_objects(&token.0, &state.images_bucket, &paths)
        .await
    {
        state.logger.log(
            LogEntry::error("Image delete failed")
                .user(user.id)
                .field("action", "delete_image")
                .field("result", "error")
                .field("path", paths[0].clone())
                .field("errorMessage", e.to_string()),
        );
        toasts.error(messages::DELETE_FAILED);
        return Err(storage_error(req_id.0, &e));
    }

    toasts.success(messages::IMAGE_DELETED);
    let [path] = paths;
    Ok(Json(ApiResponse {
        data: DeletedImage { path },
        meta: ResponseMeta::new(req_id.0),
    }))
}
