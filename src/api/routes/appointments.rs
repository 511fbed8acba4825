//! Appointment Routes
//!
//! - GET /api/v1/appointments - Today's appointments

use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use super::authorize;
use crate::api::dto::AppointmentListResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::compliance::AccessLevel;

/// GET /api/v1/appointments
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<AppointmentListResponse>> {
    authorize(&state, &headers, AccessLevel::Basic)?;

    let appointments = state.provider.appointments().await?;
    Ok(Json(AppointmentListResponse {
        total: appointments.len(),
        appointments,
    }))
}
