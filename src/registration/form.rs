//! Registration form state
//!
//! Field values, live per-field errors, the two checkbox gates and the
//! submit lifecycle for the patient-registration page.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::error::{FormErrors, Gate, RegistrationError, RegistrationResult, SubmitError};
use super::fields::{Field, REQUIRED_FIELDS};
use super::submit::{Registration, SubmitReceipt, Submitter};
use super::validator::validate_field;

/// Patient-registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    fields: BTreeMap<Field, String>,
    errors: BTreeMap<Field, String>,
    gate_errors: BTreeMap<Gate, String>,
    consent_given: bool,
    privacy_acknowledged: bool,
    submitting: bool,
    banner: Option<String>,
    today: Option<NaiveDate>,
}

impl RegistrationForm {
    /// Empty form validated against the local calendar date
    pub fn new() -> Self {
        Self {
            fields: Field::all().iter().map(|f| (*f, String::new())).collect(),
            errors: BTreeMap::new(),
            gate_errors: BTreeMap::new(),
            consent_given: false,
            privacy_acknowledged: false,
            submitting: false,
            banner: None,
            today: None,
        }
    }

    /// Empty form validated against a fixed date
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            today: Some(today),
            ..Self::new()
        }
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn value(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn fields(&self) -> &BTreeMap<Field, String> {
        &self.fields
    }

    /// Inline field errors currently showing
    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn gate_errors(&self) -> &BTreeMap<Gate, String> {
        &self.gate_errors
    }

    pub fn consent_given(&self) -> bool {
        self.consent_given
    }

    pub fn privacy_acknowledged(&self) -> bool {
        self.privacy_acknowledged
    }

    /// True while a submit is waiting on the submitter
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Page-level submission failure message, if the last submit failed
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self) -> bool {
        !self.submitting
            && self.consent_given
            && self.privacy_acknowledged
            && self.errors.is_empty()
    }

    /// Store a new value and re-validate only that field
    pub fn on_field_change(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.errors.remove(&field);

        if let Some(message) = validate_field(field, &value, self.today()) {
            self.errors.insert(field, message);
        }
        self.fields.insert(field, value);
    }

    pub fn set_consent(&mut self, given: bool) {
        self.consent_given = given;
        if given {
            self.gate_errors.remove(&Gate::Consent);
        }
    }

    pub fn set_privacy_acknowledged(&mut self, acknowledged: bool) {
        self.privacy_acknowledged = acknowledged;
        if acknowledged {
            self.gate_errors.remove(&Gate::Privacy);
        }
    }

    /// Validate the required set and both gates from scratch
    ///
    /// Optional fields are checked too once they hold a value, so a
    /// malformed email or SSN blocks the submit instead of being sent.
    pub fn validate_all(&self) -> FormErrors {
        let today = self.today();
        let mut errors = FormErrors::default();

        for field in Field::all() {
            let value = self.value(*field);
            if !REQUIRED_FIELDS.contains(field) && value.trim().is_empty() {
                continue;
            }
            if let Some(message) = validate_field(*field, value, today) {
                errors.fields.insert(*field, message);
            }
        }
        if !self.consent_given {
            errors
                .gates
                .insert(Gate::Consent, Gate::Consent.message().to_string());
        }
        if !self.privacy_acknowledged {
            errors
                .gates
                .insert(Gate::Privacy, Gate::Privacy.message().to_string());
        }

        errors
    }

    /// First half of a submit: validate and mark the form as in flight
    ///
    /// On success the returned [`Registration`] should be handed to a
    /// [`Submitter`] and the result passed to [`finish_submit`](Self::finish_submit).
    /// Callers that hold the form behind a lock can release it in between.
    pub fn begin_submit(&mut self) -> RegistrationResult<Registration> {
        if self.submitting {
            return Err(RegistrationError::InFlight);
        }

        let errors = self.validate_all();
        self.errors = errors.fields.clone();
        self.gate_errors = errors.gates.clone();

        if !errors.is_empty() {
            tracing::debug!(
                problems = errors.len(),
                focus = ?errors.first_invalid(),
                "Registration blocked by validation"
            );
            return Err(RegistrationError::Invalid(errors));
        }

        self.submitting = true;
        self.banner = None;

        Ok(Registration {
            fields: self.fields.clone(),
            consent_given: self.consent_given,
            privacy_acknowledged: self.privacy_acknowledged,
        })
    }

    /// Second half of a submit
    ///
    /// Success resets the whole form; failure keeps every value and raises
    /// the page banner.
    pub fn finish_submit(
        &mut self,
        result: Result<SubmitReceipt, SubmitError>,
    ) -> RegistrationResult<SubmitReceipt> {
        self.submitting = false;

        match result {
            Ok(receipt) => {
                self.reset();
                Ok(receipt)
            }
            Err(e) => {
                self.banner = Some(e.to_string());
                Err(RegistrationError::Submission(e))
            }
        }
    }

    /// Validate, submit and settle in one call
    pub async fn submit(&mut self, submitter: &dyn Submitter) -> RegistrationResult<SubmitReceipt> {
        let registration = self.begin_submit()?;
        let result = submitter.submit(&registration).await;
        self.finish_submit(result)
    }

    /// Back to the initial empty form
    pub fn reset(&mut self) {
        *self = Self {
            today: self.today,
            ..Self::new()
        };
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registration::SimulatedSubmitter;
    use std::time::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::with_today(today());
        form.on_field_change(Field::FirstName, "Sarah");
        form.on_field_change(Field::LastName, "Johnson");
        form.on_field_change(Field::DateOfBirth, "1979-03-02");
        form.on_field_change(Field::Phone, "(555) 123-4567");
        form.on_field_change(Field::Address, "12 Elm Street");
        form.on_field_change(Field::City, "Springfield");
        form.on_field_change(Field::State, "CA");
        form.on_field_change(Field::ZipCode, "90210");
        form
    }

    fn submitter() -> SimulatedSubmitter {
        SimulatedSubmitter::new(Duration::from_millis(50))
    }

    #[test]
    fn test_field_errors_track_last_value() {
        let mut form = RegistrationForm::with_today(today());

        form.on_field_change(Field::ZipCode, "1234");
        assert!(form.error(Field::ZipCode).is_some());

        form.on_field_change(Field::ZipCode, "12345");
        assert_eq!(form.error(Field::ZipCode), None);
        assert_eq!(form.value(Field::ZipCode), "12345");
    }

    #[test]
    fn test_phone_correction_leaves_other_errors() {
        let mut form = RegistrationForm::with_today(today());
        form.on_field_change(Field::Email, "not-an-email");
        form.on_field_change(Field::Phone, "0123");
        assert!(form.error(Field::Phone).is_some());

        form.on_field_change(Field::Phone, "555-123-4567");

        assert_eq!(form.error(Field::Phone), None);
        assert!(form.error(Field::Email).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_consent_gate_blocks_submit() {
        let mut form = filled_form();
        form.set_privacy_acknowledged(true);
        let before = form.fields().clone();

        let err = form.submit(&submitter()).await.unwrap_err();

        match err {
            RegistrationError::Invalid(errors) => {
                assert!(errors.fields.is_empty());
                assert!(errors.gates.contains_key(&Gate::Consent));
                assert!(!errors.gates.contains_key(&Gate::Privacy));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(form.fields(), &before);
        assert!(form.gate_errors().contains_key(&Gate::Consent));
        assert!(!form.is_submitting());

        // Ticking the box clears the gate error immediately
        form.set_consent(true);
        assert!(form.gate_errors().is_empty());
        assert!(form.can_submit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_reports_required_fields_and_focus() {
        let mut form = RegistrationForm::with_today(today());
        form.set_consent(true);
        form.set_privacy_acknowledged(true);
        form.on_field_change(Field::ZipCode, "1234");

        let err = form.submit(&submitter()).await.unwrap_err();
        let RegistrationError::Invalid(errors) = err else {
            panic!("expected validation failure");
        };

        assert_eq!(errors.first_invalid(), Some(Field::FirstName));
        assert!(errors.fields.contains_key(&Field::LastName));
        assert!(errors.fields.contains_key(&Field::DateOfBirth));
        assert!(errors.fields.contains_key(&Field::Phone));
        assert!(errors.fields.contains_key(&Field::ZipCode));
        assert_eq!(form.errors(), &errors.fields);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_optional_field_blocks_submit() {
        let mut form = filled_form();
        form.set_consent(true);
        form.set_privacy_acknowledged(true);
        form.on_field_change(Field::Email, "not-an-email");
        assert!(!form.can_submit());

        let err = form.submit(&submitter()).await.unwrap_err();
        let RegistrationError::Invalid(errors) = err else {
            panic!("expected validation failure");
        };
        assert_eq!(errors.first_invalid(), Some(Field::Email));
        assert_eq!(errors.len(), 1);
        assert_eq!(form.error(Field::Email), Some("Please enter a valid email address"));
        assert_eq!(form.value(Field::Email), "not-an-email");

        // Clearing the optional field is enough to submit
        form.on_field_change(Field::Email, "");
        assert!(form.can_submit());
        form.submit(&submitter()).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submit_resets_form() {
        let mut form = filled_form();
        form.set_consent(true);
        form.set_privacy_acknowledged(true);

        let receipt = form.submit(&submitter()).await.unwrap();
        assert!(!receipt.registration_id.is_nil());

        assert_eq!(form, RegistrationForm::with_today(today()));
        assert!(form.errors().is_empty());
        assert!(form.fields().values().all(|v| v.is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_submit_keeps_values_and_sets_banner() {
        let mut form = filled_form();
        form.set_consent(true);
        form.set_privacy_acknowledged(true);
        let before = form.fields().clone();

        let failing = submitter().failing("Service unavailable");
        let err = form.submit(&failing).await.unwrap_err();

        assert!(matches!(err, RegistrationError::Submission(_)));
        assert_eq!(form.banner(), Some("Service unavailable"));
        assert_eq!(form.fields(), &before);
        assert!(form.errors().is_empty());

        // Retry without re-entering anything
        form.submit(&submitter()).await.unwrap();
        assert_eq!(form.banner(), None);
    }

    #[test]
    fn test_only_one_submission_in_flight() {
        let mut form = filled_form();
        form.set_consent(true);
        form.set_privacy_acknowledged(true);

        let registration = form.begin_submit().unwrap();
        assert!(form.is_submitting());
        assert!(!form.can_submit());
        assert_eq!(registration.get(Field::FirstName), "Sarah");

        assert_eq!(form.begin_submit(), Err(RegistrationError::InFlight));

        form.finish_submit(Ok(SubmitReceipt::new())).unwrap();
        assert!(!form.is_submitting());
    }
}
