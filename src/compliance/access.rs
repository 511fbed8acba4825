//! Permission checks for protected data

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Sensitivity tier of a piece of patient data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Basic,
    Clinical,
    Financial,
    Administrative,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Basic => "basic",
            AccessLevel::Clinical => "clinical",
            AccessLevel::Financial => "financial",
            AccessLevel::Administrative => "administrative",
        }
    }

    /// Every permission a user must hold for this level
    pub fn required_permissions(&self) -> &'static [&'static str] {
        match self {
            AccessLevel::Basic => &["read_basic"],
            AccessLevel::Clinical => &["read_clinical", "read_basic"],
            AccessLevel::Financial => &["read_financial"],
            AccessLevel::Administrative => &["read_admin"],
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Insufficient permissions for {level} access")]
pub struct AccessDenied {
    pub level: AccessLevel,
    pub missing: Vec<String>,
}

pub fn check_access<S: AsRef<str>>(level: AccessLevel, permissions: &[S]) -> Result<(), AccessDenied> {
    let missing: Vec<String> = level
        .required_permissions()
        .iter()
        .filter(|required| !permissions.iter().any(|p| p.as_ref() == **required))
        .map(|s| s.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AccessDenied { level, missing })
    }
}
