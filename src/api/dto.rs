//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::data::{Appointment, DashboardStat, Notification, NotificationCounts, Patient};
use crate::display::{animation_frames, DisplayConfig, Displayable};
use crate::registration::Field;
use crate::session::{ActivityKind, SessionConfig, SessionEvent, SessionSnapshot};

// ============================================
// PATIENT DTOs
// ============================================

/// Patient row with its status badge styling
#[derive(Debug, Serialize)]
pub struct PatientView {
    #[serde(flatten)]
    pub patient: Patient,
    pub status_display: DisplayConfig,
}

impl From<Patient> for PatientView {
    fn from(patient: Patient) -> Self {
        Self {
            status_display: patient.status.display(),
            patient,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PatientListResponse {
    pub patients: Vec<PatientView>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<Appointment>,
    pub total: usize,
}

// ============================================
// DASHBOARD DTOs
// ============================================

/// Stats card with everything needed to render its variant
#[derive(Debug, Serialize)]
pub struct StatView {
    #[serde(flatten)]
    pub stat: DashboardStat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_display: Option<DisplayConfig>,
    /// Count-up frames for animated variants
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<String>,
}

impl From<DashboardStat> for StatView {
    fn from(stat: DashboardStat) -> Self {
        let frames = if stat.variant.animates() {
            animation_frames(&stat.value)
        } else {
            Vec::new()
        };

        Self {
            trend_display: stat.change.as_ref().map(|c| c.trend.display()),
            frames,
            stat,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardStatsResponse {
    pub stats: Vec<StatView>,
}

// ============================================
// NOTIFICATION DTOs
// ============================================

#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NotificationView {
    #[serde(flatten)]
    pub notification: Notification,
    pub display: DisplayConfig,
}

impl From<Notification> for NotificationView {
    fn from(notification: Notification) -> Self {
        Self {
            display: notification.kind.display(),
            notification,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationView>,
    pub counts: NotificationCounts,
    /// Bell badge text, absent when nothing is unread
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

// ============================================
// REGISTRATION DTOs
// ============================================

/// Single-field validation request
#[derive(Debug, Deserialize)]
pub struct ValidateFieldRequest {
    pub field: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateFieldResponse {
    pub field: Field,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Full registration submission
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default)]
    pub fields: BTreeMap<Field, String>,
    #[serde(default)]
    pub consent_given: bool,
    #[serde(default)]
    pub privacy_acknowledged: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub registration_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub patient_name: String,
    /// Contact details as they may be echoed on screen
    pub masked: MaskedContact,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MaskedContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ============================================
// SESSION DTOs
// ============================================

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub timeout_minutes: Option<u64>,
    pub warning_minutes: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSettingsView {
    pub timeout_minutes: u64,
    pub warning_minutes: u64,
}

impl From<&SessionConfig> for SessionSettingsView {
    fn from(config: &SessionConfig) -> Self {
        Self {
            timeout_minutes: config.timeout_minutes(),
            warning_minutes: config.warning_minutes(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub config: SessionSettingsView,
    pub state: SessionSnapshot,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityRequest {
    pub kind: Option<ActivityKind>,
}

/// Result of a session command
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCommandResponse {
    /// Whether the command changed the countdown
    pub applied: bool,
    pub state: SessionSnapshot,
}

/// Messages sent by a session event-stream client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Activity {
        #[serde(default)]
        kind: Option<ActivityKind>,
    },
    Extend,
    Ping,
}

/// Messages pushed to a session event-stream client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Snapshot { state: SessionSnapshot },
    Event { event: SessionEvent },
    Error { message: String },
    Pong,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: healthy or degraded
    pub status: String,
    /// Data provider status
    pub data_provider: String,
    /// Number of open sessions
    pub open_sessions: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Trend;
    use crate::display::StatsCardVariant;

    #[test]
    fn test_stat_view_frames_only_for_animated() {
        let basic = StatView::from(DashboardStat::new("Satisfaction", "4.7/5"));
        assert!(basic.frames.is_empty());
        assert!(basic.trend_display.is_none());

        let animated = StatView::from(
            DashboardStat::new("Occupancy", "87%")
                .variant(StatsCardVariant::Animated)
                .change("-2%", Trend::Down, "optimal level"),
        );
        assert_eq!(animated.frames.len(), crate::display::ANIMATION_FRAMES);
        assert_eq!(animated.trend_display.unwrap().icon, "trending-down");
    }

    #[test]
    fn test_client_message_parsing() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"activity","kind":"key_press"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::Activity {
                kind: Some(ActivityKind::KeyPress)
            }
        );

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"extend"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Extend);
    }

    #[test]
    fn test_registration_request_keys() {
        let req: RegistrationRequest = serde_json::from_str(
            r#"{"fields":{"firstName":"Ada","zipCode":"12345"},"consentGiven":true}"#,
        )
        .unwrap();
        assert_eq!(req.fields.get(&Field::FirstName).map(String::as_str), Some("Ada"));
        assert!(req.consent_given);
        assert!(!req.privacy_acknowledged);
    }
}
