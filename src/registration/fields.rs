//! Registration form fields
//!
//! Every input on the patient-registration page, in the order it appears on
//! the page. Wire names are the camelCase names the page shell posts.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One input on the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    // Personal information
    FirstName,
    LastName,
    DateOfBirth,
    Gender,
    Ssn,
    MaritalStatus,
    // Contact information
    Phone,
    Email,
    Address,
    City,
    State,
    ZipCode,
    // Emergency contact
    EmergencyContactName,
    EmergencyRelationship,
    EmergencyPhone,
    EmergencyEmail,
    // Medical information
    BloodType,
    PrimaryPhysician,
    Allergies,
    CurrentMedications,
    MedicalHistory,
    // Insurance
    InsuranceProvider,
    PolicyNumber,
    GroupNumber,
    PolicyHolder,
}

/// Fields re-validated on every submit
pub const REQUIRED_FIELDS: &[Field] = &[
    Field::FirstName,
    Field::LastName,
    Field::DateOfBirth,
    Field::Phone,
    Field::Address,
    Field::City,
    Field::State,
    Field::ZipCode,
];

impl Field {
    /// All fields in page order
    pub fn all() -> &'static [Field] {
        &[
            Field::FirstName,
            Field::LastName,
            Field::DateOfBirth,
            Field::Gender,
            Field::Ssn,
            Field::MaritalStatus,
            Field::Phone,
            Field::Email,
            Field::Address,
            Field::City,
            Field::State,
            Field::ZipCode,
            Field::EmergencyContactName,
            Field::EmergencyRelationship,
            Field::EmergencyPhone,
            Field::EmergencyEmail,
            Field::BloodType,
            Field::PrimaryPhysician,
            Field::Allergies,
            Field::CurrentMedications,
            Field::MedicalHistory,
            Field::InsuranceProvider,
            Field::PolicyNumber,
            Field::GroupNumber,
            Field::PolicyHolder,
        ]
    }

    /// Wire name, e.g. `dateOfBirth`
    pub fn name(&self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::DateOfBirth => "dateOfBirth",
            Field::Gender => "gender",
            Field::Ssn => "ssn",
            Field::MaritalStatus => "maritalStatus",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
            Field::City => "city",
            Field::State => "state",
            Field::ZipCode => "zipCode",
            Field::EmergencyContactName => "emergencyContactName",
            Field::EmergencyRelationship => "emergencyRelationship",
            Field::EmergencyPhone => "emergencyPhone",
            Field::EmergencyEmail => "emergencyEmail",
            Field::BloodType => "bloodType",
            Field::PrimaryPhysician => "primaryPhysician",
            Field::Allergies => "allergies",
            Field::CurrentMedications => "currentMedications",
            Field::MedicalHistory => "medicalHistory",
            Field::InsuranceProvider => "insuranceProvider",
            Field::PolicyNumber => "policyNumber",
            Field::GroupNumber => "groupNumber",
            Field::PolicyHolder => "policyHolder",
        }
    }

    /// Label shown beside the control
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::DateOfBirth => "Date of Birth",
            Field::Gender => "Gender",
            Field::Ssn => "Social Security Number",
            Field::MaritalStatus => "Marital Status",
            Field::Phone => "Phone Number",
            Field::Email => "Email Address",
            Field::Address => "Address",
            Field::City => "City",
            Field::State => "State",
            Field::ZipCode => "ZIP Code",
            Field::EmergencyContactName => "Contact Name",
            Field::EmergencyRelationship => "Relationship",
            Field::EmergencyPhone => "Contact Phone",
            Field::EmergencyEmail => "Contact Email",
            Field::BloodType => "Blood Type",
            Field::PrimaryPhysician => "Primary Care Physician",
            Field::Allergies => "Known Allergies",
            Field::CurrentMedications => "Current Medications",
            Field::MedicalHistory => "Medical History",
            Field::InsuranceProvider => "Insurance Provider",
            Field::PolicyNumber => "Policy Number",
            Field::GroupNumber => "Group Number",
            Field::PolicyHolder => "Policy Holder Name",
        }
    }

    pub fn is_required(&self) -> bool {
        REQUIRED_FIELDS.contains(self)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown field name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown registration field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::all()
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for field in Field::all() {
            assert_eq!(field.name().parse::<Field>().unwrap(), *field);
        }
        assert!("favoriteColor".parse::<Field>().is_err());
    }

    #[test]
    fn test_serde_names_match_wire_names() {
        for field in Field::all() {
            let json = serde_json::to_string(field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.name()));
        }
    }

    #[test]
    fn test_required_set() {
        assert_eq!(REQUIRED_FIELDS.len(), 8);
        assert!(Field::ZipCode.is_required());
        assert!(!Field::Email.is_required());
        assert!(!Field::Ssn.is_required());
    }
}
