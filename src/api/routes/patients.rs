//! Patient Routes
//!
//! - GET /api/v1/patients - List patients, optionally filtered
//! - GET /api/v1/patients/:id - Patient detail (audited)

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{audit, authorize};
use crate::api::dto::{PatientListResponse, PatientView};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::compliance::{AccessLevel, ResourceType};
use crate::data::{PatientFilter, PatientStatus};

#[derive(Debug, Deserialize)]
pub struct PatientQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl PatientQuery {
    fn into_filter(self) -> ApiResult<PatientFilter> {
        let mut filter = PatientFilter::default();
        if let Some(search) = self.search {
            filter = filter.search(search);
        }
        if let Some(status) = self.status.filter(|s| !s.is_empty() && s != "all") {
            let status: PatientStatus = status.parse().map_err(ApiError::Validation)?;
            filter = filter.status(status);
        }
        Ok(filter)
    }
}

/// GET /api/v1/patients
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<PatientQuery>,
) -> ApiResult<Json<PatientListResponse>> {
    authorize(&state, &headers, AccessLevel::Basic)?;

    let filter = query.into_filter()?;
    let patients: Vec<PatientView> = state
        .provider
        .patients(&filter)
        .await?
        .into_iter()
        .map(PatientView::from)
        .collect();

    Ok(Json(PatientListResponse {
        total: patients.len(),
        patients,
    }))
}

/// GET /api/v1/patients/:id
///
/// Clinical detail; every successful read is written to the audit trail.
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<Json<PatientView>> {
    authorize(&state, &headers, AccessLevel::Clinical)?;

    let patient = state.provider.patient(&id).await?;
    audit(
        &headers,
        "view_patient",
        ResourceType::Patient,
        Some(&patient.id),
        AccessLevel::Clinical,
    );

    Ok(Json(PatientView::from(patient)))
}
