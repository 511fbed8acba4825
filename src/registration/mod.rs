//! Patient Registration
//!
//! Per-field validation with live error state, consent/privacy gates and a
//! pluggable submission boundary:
//!
//! - **fields**: The form's inputs and the required set
//! - **validator**: Pure per-field rules
//! - **form**: Form state and the submit lifecycle
//! - **submit**: The `Submitter` boundary and its simulated implementation
//! - **error**: Field, gate and submission errors
//!
//! # Example
//!
//! ```rust,no_run
//! use ehr_dashboard::registration::{Field, RegistrationForm, SimulatedSubmitter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut form = RegistrationForm::new();
//!     form.on_field_change(Field::FirstName, "Sarah");
//!     form.on_field_change(Field::ZipCode, "1234");
//!     assert!(form.error(Field::ZipCode).is_some());
//!
//!     let submitter = SimulatedSubmitter::default();
//!     if let Err(e) = form.submit(&submitter).await {
//!         println!("{}", e);
//!     }
//! }
//! ```

pub mod error;
pub mod fields;
pub mod form;
pub mod submit;
pub mod validator;

pub use error::{FormErrors, Gate, RegistrationError, RegistrationResult, SubmitError};
pub use fields::{Field, UnknownField, REQUIRED_FIELDS};
pub use form::RegistrationForm;
pub use submit::{Registration, SimulatedSubmitter, SubmitReceipt, Submitter};
pub use validator::{validate_field, validate_field_today, DATE_FORMAT};
