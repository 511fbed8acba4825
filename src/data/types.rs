//! Dashboard entity types
//!
//! - `Patient` and `PatientStatus`: rows of the patient list
//! - `Appointment`: today's appointment table
//! - `Notification`, `NotificationKind`, `Priority`: the notification panel
//! - `DashboardStat`, `StatChange`, `Trend`: stats cards

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::display::StatsCardVariant;

/// Clinical status shown as a badge on the patient list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    Stable,
    Caution,
    Critical,
    Inactive,
}

impl PatientStatus {
    pub fn all() -> &'static [PatientStatus] {
        &[
            PatientStatus::Stable,
            PatientStatus::Caution,
            PatientStatus::Critical,
            PatientStatus::Inactive,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Stable => "stable",
            PatientStatus::Caution => "caution",
            PatientStatus::Critical => "critical",
            PatientStatus::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatientStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Invalid patient status: {}. Use stable, caution, critical or inactive",
                    s
                )
            })
    }
}

/// A patient on the ward list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    /// Medical record number
    pub mrn: String,
    pub age: u32,
    pub primary_condition: String,
    pub status: PatientStatus,
    pub location: String,
    pub attending_physician: String,
    /// ISO date
    pub admission_date: String,
    /// ISO date
    pub last_visit: String,
    pub blood_type: String,
    #[serde(default)]
    pub alerts: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

/// Filter for the patient list
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PatientFilter {
    /// Case-insensitive match on name, MRN or condition
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<PatientStatus>,
}

impl PatientFilter {
    /// Builder method: set the search text
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Builder method: restrict to one status
    pub fn status(mut self, status: PatientStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, patient: &Patient) -> bool {
        if let Some(status) = self.status {
            if patient.status != status {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                [&patient.name, &patient.mrn, &patient.primary_condition]
                    .iter()
                    .any(|haystack| haystack.to_lowercase().contains(&needle))
            }
        }
    }
}

/// An entry in today's appointment table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    pub reason: String,
    pub diagnosis: String,
    /// Display time, e.g. "09:50 AM"
    pub time: String,
}

/// Notification category, drives the panel styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Critical,
    Warning,
    Info,
    Success,
}

/// Notification priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A notification in the header dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    /// Relative time label, e.g. "2 minutes ago"
    pub timestamp: String,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub starred: bool,
}

impl Notification {
    /// Unread and critical
    pub fn is_urgent(&self) -> bool {
        self.kind == NotificationKind::Critical && !self.read
    }
}

/// Direction of a stat change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// Change badge under a stat value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChange {
    /// Display value, e.g. "+12%"
    pub value: String,
    pub trend: Trend,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// One stats card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStat {
    pub title: String,
    /// Display value, e.g. "1,247" or "87%"
    pub value: String,
    pub variant: StatsCardVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<StatChange>,
}

impl DashboardStat {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            variant: StatsCardVariant::Basic,
            change: None,
        }
    }

    /// Builder method: choose the card variant
    pub fn variant(mut self, variant: StatsCardVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Builder method: attach a change badge
    pub fn change(mut self, value: impl Into<String>, trend: Trend, period: &str) -> Self {
        self.change = Some(StatChange {
            value: value.into(),
            trend,
            period: Some(period.to_string()),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(name: &str, mrn: &str, condition: &str, status: PatientStatus) -> Patient {
        Patient {
            id: "1".to_string(),
            name: name.to_string(),
            mrn: mrn.to_string(),
            age: 40,
            primary_condition: condition.to_string(),
            status,
            location: "Room 1".to_string(),
            attending_physician: "Dr. Smith".to_string(),
            admission_date: "2024-01-15".to_string(),
            last_visit: "2024-01-20".to_string(),
            blood_type: "A+".to_string(),
            alerts: vec![],
            allergies: vec![],
        }
    }

    #[test]
    fn test_patient_filter() {
        let p = patient("Sarah Johnson", "MRN-001234", "Hypertension", PatientStatus::Stable);

        assert!(PatientFilter::default().matches(&p));
        assert!(PatientFilter::default().search("sarah").matches(&p));
        assert!(PatientFilter::default().search("001234").matches(&p));
        assert!(PatientFilter::default().search("HYPER").matches(&p));
        assert!(PatientFilter::default().search("  ").matches(&p));
        assert!(!PatientFilter::default().search("chen").matches(&p));
        assert!(!PatientFilter::default()
            .status(PatientStatus::Critical)
            .matches(&p));
        assert!(PatientFilter::default()
            .search("sarah")
            .status(PatientStatus::Stable)
            .matches(&p));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Critical".parse::<PatientStatus>(), Ok(PatientStatus::Critical));
        assert!("unknown".parse::<PatientStatus>().is_err());
    }

    #[test]
    fn test_notification_serialization() {
        let n = Notification {
            id: "1".to_string(),
            title: "Critical Lab Result".to_string(),
            message: "Abnormal glucose".to_string(),
            kind: NotificationKind::Critical,
            timestamp: "2 minutes ago".to_string(),
            read: false,
            patient: None,
            department: Some("Laboratory".to_string()),
            priority: Some(Priority::High),
            starred: true,
        };

        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["kind"], "critical");
        assert_eq!(json["priority"], "high");
        assert!(json.get("patient").is_none());
        assert!(n.is_urgent());
    }
}
