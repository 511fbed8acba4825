//! Notification Routes
//!
//! - GET /api/v1/notifications?filter= - List with counts and badge
//! - POST /api/v1/notifications/:id/read - Mark one as read
//! - POST /api/v1/notifications/:id/star - Toggle the star
//! - DELETE /api/v1/notifications/:id - Remove one
//! - POST /api/v1/notifications/read-all - Mark everything read

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{NotificationListResponse, NotificationQuery, NotificationView};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::data::{NotificationCenter, NotificationCounts, NotificationFilter};

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Notification {}", id))
}

fn view_of(center: &NotificationCenter, id: &str) -> ApiResult<Json<NotificationView>> {
    center
        .get(id)
        .cloned()
        .map(|n| Json(NotificationView::from(n)))
        .ok_or_else(|| not_found(id))
}

/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<NotificationQuery>,
) -> ApiResult<Json<NotificationListResponse>> {
    let filter = match query.filter.as_deref() {
        None | Some("") => NotificationFilter::All,
        Some(f) => f.parse().map_err(ApiError::Validation)?,
    };

    let center = state.notifications.read().await;
    Ok(Json(NotificationListResponse {
        notifications: center
            .filtered(filter)
            .into_iter()
            .map(NotificationView::from)
            .collect(),
        counts: center.counts(),
        badge: center.badge_label(),
    }))
}

/// POST /api/v1/notifications/:id/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<NotificationView>> {
    let mut center = state.notifications.write().await;
    if !center.mark_read(&id) {
        return Err(not_found(&id));
    }
    view_of(&center, &id)
}

/// POST /api/v1/notifications/:id/star
pub async fn toggle_star(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<NotificationView>> {
    let mut center = state.notifications.write().await;
    if !center.toggle_star(&id) {
        return Err(not_found(&id));
    }
    view_of(&center, &id)
}

/// DELETE /api/v1/notifications/:id
pub async fn delete_notification(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.notifications.write().await.delete(&id) {
        tracing::info!(notification_id = %id, "Deleted notification");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(&id))
    }
}

/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(State(state): State<Arc<AppState>>) -> Json<NotificationCounts> {
    let mut center = state.notifications.write().await;
    center.mark_all_read();
    Json(center.counts())
}
