//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::compliance::AccessDenied;
use crate::data::DataError;
use crate::registration::{FormErrors, RegistrationError};
use crate::session::SessionError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller lacks the permissions for the requested data
    #[error("{0}")]
    Forbidden(#[from] AccessDenied),

    /// Registration form failed validation
    #[error("Registration has {} invalid entries", .0.len())]
    InvalidForm(FormErrors),

    /// A registration for this form is already being submitted
    #[error("A submission is already in progress")]
    Conflict,

    /// The submission backend rejected or failed the registration
    #[error("Submission failed: {0}")]
    SubmissionFailed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Service unavailable (dependency down)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DataError> for ApiError {
    fn from(e: DataError) -> Self {
        match e {
            DataError::NotFound(what) => ApiError::NotFound(what),
            DataError::Unavailable(reason) => ApiError::ServiceUnavailable(reason),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::InvalidConfig(reason) => ApiError::Validation(reason),
            SessionError::NotFound(id) => ApiError::NotFound(format!("Session {}", id)),
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(e: RegistrationError) -> Self {
        match e {
            RegistrationError::Invalid(errors) => ApiError::InvalidForm(errors),
            RegistrationError::InFlight => ApiError::Conflict,
            RegistrationError::Submission(e) => ApiError::SubmissionFailed(e.to_string()),
        }
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Per-field and per-gate messages for invalid forms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FormErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "ACCESS_DENIED"),
            ApiError::InvalidForm(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_REGISTRATION"),
            ApiError::Conflict => (StatusCode::CONFLICT, "SUBMISSION_IN_PROGRESS"),
            ApiError::SubmissionFailed(_) => (StatusCode::BAD_GATEWAY, "SUBMISSION_FAILED"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::debug!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let message = self.to_string();
        let details = match self {
            ApiError::InvalidForm(errors) => Some(errors),
            _ => None,
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::{Field, SubmitError};

    #[test]
    fn test_status_mapping() {
        let cases: Vec<(ApiError, StatusCode)> = vec![
            (ApiError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                DataError::NotFound("Patient 9".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                SessionError::NotFound("x".into()).into(),
                StatusCode::NOT_FOUND,
            ),
            (RegistrationError::InFlight.into(), StatusCode::CONFLICT),
            (
                RegistrationError::Submission(SubmitError("down".into())).into(),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_invalid_form_is_unprocessable() {
        let mut errors = FormErrors::default();
        errors
            .fields
            .insert(Field::Email, "Please enter a valid email address".into());

        let response = ApiError::from(RegistrationError::Invalid(errors)).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
