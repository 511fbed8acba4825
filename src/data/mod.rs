//! Dashboard Data
//!
//! Entity types, the injected [`DataProvider`] and the notification center.

pub mod notifications;
pub mod provider;
pub mod types;

pub use notifications::{NotificationCenter, NotificationCounts, NotificationFilter};
pub use provider::{DataError, DataProvider, DataResult, MockDataProvider};
pub use types::{
    Appointment, DashboardStat, Notification, NotificationKind, Patient, PatientFilter,
    PatientStatus, Priority, StatChange, Trend,
};
