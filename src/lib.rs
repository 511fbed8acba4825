//! # EHR Dashboard
//!
//! Core of a clinical dashboard: the idle-session monitor that logs an
//! inactive clinician out, the patient-registration validator, and the data
//! and display layer the dashboard pages render from.
//!
//! ## Modules
//!
//! - [`session`]: Idle-session countdown, warning and expiry
//! - [`registration`]: Field rules, form state and submission
//! - [`data`]: Entity types, the data provider and notifications
//! - [`display`]: Stats card variants and per-variant styling
//! - [`compliance`]: PHI masking, access levels and audit entries
//! - [`config`]: TOML and environment configuration
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ehr_dashboard::registration::{Field, RegistrationForm, SimulatedSubmitter};
//! use ehr_dashboard::session::{ActivityKind, SessionConfig, SessionMonitor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 20 minute idle timeout, warning 5 minutes before expiry
//!     let monitor = SessionMonitor::start(SessionConfig::new(20, 5)?);
//!     monitor.on_user_activity(ActivityKind::KeyPress).await;
//!
//!     let mut form = RegistrationForm::new();
//!     form.on_field_change(Field::FirstName, "Sarah");
//!     form.on_field_change(Field::Email, "sarah@");
//!     assert!(form.error(Field::Email).is_some());
//!
//!     let submitter = SimulatedSubmitter::default();
//!     if let Err(e) = form.submit(&submitter).await {
//!         println!("Not submitted: {}", e);
//!     }
//!
//!     monitor.shutdown();
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod compliance;
pub mod config;
pub mod data;
pub mod display;
pub mod registration;
pub mod session;

// Re-export top-level types for convenience
pub use session::{
    ActivityKind, SessionConfig, SessionError, SessionEvent, SessionMonitor, SessionRegistry,
    SessionSnapshot,
};

pub use registration::{
    validate_field, Field, FormErrors, RegistrationError, RegistrationForm, SimulatedSubmitter,
    Submitter,
};

pub use data::{DataProvider, MockDataProvider, NotificationCenter};

pub use display::{DisplayConfig, Displayable, StatsCardVariant};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError};
