//! Field validation rules
//!
//! [`validate_field`] is pure: the same field, value and reference date
//! always produce the same result.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use super::fields::Field;

/// Date format accepted for the date of birth (HTML date input)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static PHONE: OnceLock<Regex> = OnceLock::new();
static EMAIL: OnceLock<Regex> = OnceLock::new();
static SSN: OnceLock<Regex> = OnceLock::new();
static ZIP: OnceLock<Regex> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("validation pattern is a valid literal"))
}

/// Validate one field value
///
/// Returns the message to show beside the control, or `None` when the value
/// is acceptable. `today` is the reference date for the date of birth.
pub fn validate_field(field: Field, value: &str, today: NaiveDate) -> Option<String> {
    match field {
        Field::FirstName => required(value, "First name is required"),
        Field::LastName => required(value, "Last name is required"),
        Field::DateOfBirth => validate_date_of_birth(value, today),
        Field::Phone => validate_phone(value),
        Field::Email => optional(value, |v| {
            pattern(&EMAIL, r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_match(v)
        })
        .then(|| "Please enter a valid email address".to_string()),
        Field::Ssn => optional(value, |v| pattern(&SSN, r"^\d{3}-?\d{2}-?\d{4}$").is_match(v))
            .then(|| "Please enter a valid SSN (XXX-XX-XXXX)".to_string()),
        Field::ZipCode => optional(value, |v| pattern(&ZIP, r"^\d{5}(-\d{4})?$").is_match(v))
            .then(|| "Please enter a valid ZIP code".to_string()),
        _ => None,
    }
}

/// Validate against the local calendar date
pub fn validate_field_today(field: Field, value: &str) -> Option<String> {
    validate_field(field, value, chrono::Local::now().date_naive())
}

fn required(value: &str, message: &str) -> Option<String> {
    value.trim().is_empty().then(|| message.to_string())
}

/// True when a non-empty optional value fails `is_valid`
fn optional(value: &str, is_valid: impl Fn(&str) -> bool) -> bool {
    let value = value.trim();
    !value.is_empty() && !is_valid(value)
}

fn validate_date_of_birth(value: &str, today: NaiveDate) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Date of birth is required".to_string());
    }

    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) if date > today => Some("Date of birth cannot be in the future".to_string()),
        Ok(_) => None,
        Err(_) => Some("Date of birth must be a valid date (YYYY-MM-DD)".to_string()),
    }
}

fn validate_phone(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some("Phone number is required".to_string());
    }

    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if pattern(&PHONE, r"^[1-9]\d{0,14}$").is_match(&digits) {
        None
    } else {
        Some("Please enter a valid phone number".to_string())
    }
}
