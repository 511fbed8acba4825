//! Registration Routes
//!
//! - POST /api/v1/registration/validate - Validate a single field
//! - POST /api/v1/registration - Validate and submit a full registration

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{
    MaskedContact, RegistrationRequest, RegistrationResponse, ValidateFieldRequest,
    ValidateFieldResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::compliance::{mask, MaskKind};
use crate::registration::{validate_field_today, Field, Registration, RegistrationForm};

/// POST /api/v1/registration/validate
///
/// Same rules the form applies on every keystroke.
pub async fn validate(Json(req): Json<ValidateFieldRequest>) -> ApiResult<Json<ValidateFieldResponse>> {
    let field: Field = req
        .field
        .parse()
        .map_err(|e: crate::registration::UnknownField| ApiError::Validation(e.to_string()))?;

    let error = validate_field_today(field, &req.value);
    Ok(Json(ValidateFieldResponse {
        field,
        valid: error.is_none(),
        error,
    }))
}

/// POST /api/v1/registration
///
/// 201 with a receipt, 422 with per-field and gate errors, 502 when the
/// submission backend fails.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegistrationRequest>,
) -> ApiResult<(StatusCode, Json<RegistrationResponse>)> {
    let mut form = RegistrationForm::new();
    for (field, value) in req.fields {
        form.on_field_change(field, value);
    }
    form.set_consent(req.consent_given);
    form.set_privacy_acknowledged(req.privacy_acknowledged);

    let registration = form.begin_submit()?;
    let result = state.submitter.submit(&registration).await;
    let receipt = form.finish_submit(result)?;

    tracing::info!(
        registration_id = %receipt.registration_id,
        "Patient registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            registration_id: receipt.registration_id,
            submitted_at: receipt.submitted_at,
            patient_name: format!(
                "{} {}",
                registration.get(Field::FirstName),
                registration.get(Field::LastName)
            ),
            masked: masked_contact(&registration),
        }),
    ))
}

fn masked_contact(registration: &Registration) -> MaskedContact {
    let optional = |field: Field, kind: MaskKind| {
        Some(registration.get(field))
            .filter(|v| !v.is_empty())
            .map(|v| mask(v, kind))
    };

    MaskedContact {
        ssn: optional(Field::Ssn, MaskKind::Ssn),
        phone: mask(registration.get(Field::Phone), MaskKind::Phone),
        email: optional(Field::Email, MaskKind::Email),
    }
}
