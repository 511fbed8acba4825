//! Access audit trail
//!
//! Entries are emitted as structured `tracing` events on the
//! `ehr_dashboard::audit` target so a subscriber can route them to a
//! dedicated sink.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::access::AccessLevel;

pub const AUDIT_TARGET: &str = "ehr_dashboard::audit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Patient,
    Medication,
    Lab,
    Appointment,
    System,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Default severity for reading data at `level`
    pub fn for_access(level: AccessLevel) -> Self {
        match level {
            AccessLevel::Financial => Severity::High,
            _ => Severity::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    pub user_id: String,
    pub user_role: String,
    pub severity: Severity,
    /// "unknown" when no session is attached
    pub session_id: String,
}

impl AuditEntry {
    pub fn new(
        action: impl Into<String>,
        resource_type: ResourceType,
        user_id: impl Into<String>,
        user_role: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            action: action.into(),
            resource_type,
            resource_id: None,
            user_id: user_id.into(),
            user_role: user_role.into(),
            severity: Severity::default(),
            session_id: "unknown".to_string(),
        }
    }

    /// Builder method: set the accessed resource id
    pub fn resource(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Builder method: set the severity
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Builder method: attach the session id
    pub fn session(mut self, id: impl ToString) -> Self {
        self.session_id = id.to_string();
        self
    }

    /// Emit the entry on the audit target
    pub fn record(&self) {
        tracing::info!(
            target: AUDIT_TARGET,
            timestamp = %self.timestamp.to_rfc3339(),
            action = %self.action,
            resource_type = ?self.resource_type,
            resource_id = self.resource_id.as_deref().unwrap_or("-"),
            user_id = %self.user_id,
            user_role = %self.user_role,
            severity = ?self.severity,
            session_id = %self.session_id,
            "audit"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_serialization() {
        let entry = AuditEntry::new("view_patient", ResourceType::Patient, "u-1", "physician")
            .resource("4")
            .severity(Severity::for_access(AccessLevel::Financial))
            .session("abc");

        assert_eq!(entry.severity, Severity::High);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["resource_type"], "patient");
        assert_eq!(json["severity"], "high");
        assert_eq!(json["session_id"], "abc");

        entry.record();
    }

    #[test]
    fn test_defaults() {
        let entry = AuditEntry::new("login", ResourceType::System, "u-1", "nurse");
        assert_eq!(entry.severity, Severity::Medium);
        assert_eq!(entry.session_id, "unknown");
        assert!(entry.resource_id.is_none());
        assert_eq!(Severity::for_access(AccessLevel::Clinical), Severity::Medium);
    }
}
