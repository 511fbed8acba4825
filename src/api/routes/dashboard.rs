//! Dashboard Routes
//!
//! - GET /api/v1/dashboard/stats - Stats cards with variant rendering data

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{DashboardStatsResponse, StatView};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DashboardStatsResponse>> {
    let stats = state
        .provider
        .dashboard_stats()
        .await?
        .into_iter()
        .map(StatView::from)
        .collect();

    Ok(Json(DashboardStatsResponse { stats }))
}
