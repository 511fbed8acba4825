//! Registration error types
//!
//! Three kinds of failure, all recoverable:
//!
//! - **Field**: one input failed validation; shown inline beside it
//! - **Gate**: consent or privacy acknowledgment missing; shown beside the checkbox
//! - **Submission**: the submit call itself failed; shown as a page banner

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::fields::Field;

/// Checkbox gates that must be ticked before submitting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Gate {
    Consent,
    Privacy,
}

impl Gate {
    pub fn message(&self) -> &'static str {
        match self {
            Gate::Consent => "Patient consent is required before registration",
            Gate::Privacy => "The privacy notice must be acknowledged",
        }
    }
}

/// Every failure found by a full-form validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    /// Inline field errors, in page order
    pub fields: BTreeMap<Field, String>,
    /// Unticked gates
    pub gates: BTreeMap<Gate, String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.gates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len() + self.gates.len()
    }

    /// Field that should receive focus
    pub fn first_invalid(&self) -> Option<Field> {
        self.fields.keys().next().copied()
    }
}

/// Failure reported by a [`Submitter`](super::Submitter)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SubmitError(pub String);

/// Errors returned by a submit attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// Validation or gate failures; nothing was sent
    #[error("Registration has {} problem(s) to fix", .0.len())]
    Invalid(FormErrors),

    /// Another submission has not finished yet
    #[error("A registration is already being submitted")]
    InFlight,

    /// The submit call failed; form contents are kept for a retry
    #[error("Registration could not be submitted: {0}")]
    Submission(#[from] SubmitError),
}

/// Result type alias for registration operations
pub type RegistrationResult<T> = Result<T, RegistrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_invalid_follows_page_order() {
        let mut errors = FormErrors::default();
        errors.fields.insert(Field::ZipCode, "bad".to_string());
        errors.fields.insert(Field::Phone, "bad".to_string());
        errors.gates.insert(Gate::Consent, Gate::Consent.message().to_string());

        assert_eq!(errors.first_invalid(), Some(Field::Phone));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_form_errors_json_shape() {
        let mut errors = FormErrors::default();
        errors.fields.insert(Field::FirstName, "First name is required".to_string());
        errors.gates.insert(Gate::Privacy, Gate::Privacy.message().to_string());

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["fields"]["firstName"], "First name is required");
        assert!(json["gates"]["privacy"].is_string());
    }

    #[test]
    fn test_error_display() {
        let err = RegistrationError::Submission(SubmitError("gateway timeout".to_string()));
        assert_eq!(
            err.to_string(),
            "Registration could not be submitted: gateway timeout"
        );
    }
}
