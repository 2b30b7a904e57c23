use axum::{
    extract::{Path, State},
    Extension, Json,
};
use meshi_supabase::AuthUser;
use meshi_toast::{ToastId, ToastKind};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct NotificationItem {
    id: ToastId,
    #[serde(rename = "type")]
    kind: ToastKind,
    message: String,
    style: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DismissResult {
    removed: bool,
}

/// GET /api/v1/notifications: The caller's active toasts in display order.
pub(super) async fn list_notifications(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
) -> Json<ApiResponse<Vec<NotificationItem>>> {
    let toasts = state.toasts.for_user(user.id);
    let data = toasts
        .toasts()
        .into_iter()
        .map(|toast| NotificationItem {
            id: toast.id,
            kind: toast.kind,
            style: toasts.style_for(toast.kind.as_str()).to_owned(),
            message: toast.message,
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}

/// DELETE /api/v1/notifications/{id}: Dismiss a toast. Unknown ids are not
/// an error.
pub(super) async fn dismiss_notification(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<u64>,
) -> Json<ApiResponse<DismissResult>> {
    let removed = state.toasts.for_user(user.id).remove(ToastId::from(id));

    Json(ApiResponse {
        data: DismissResult { removed },
        meta: ResponseMeta::new(req_id.0),
    })
}
