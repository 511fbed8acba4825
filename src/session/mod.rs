//! Idle-Session Monitoring
//!
//! Detects user inactivity and enforces a session expiry with an advance
//! warning:
//!
//! - **state**: Pure countdown state machine (`SessionState`)
//! - **monitor**: Ticker-driven monitor owning one state (`SessionMonitor`)
//! - **activity**: Tracked input kinds, hooks and published events
//! - **registry**: Open sessions keyed by id, used by the API
//! - **error**: Error types
//!
//! # Lifecycle
//!
//! ```text
//! Active ──(remaining <= warning)──► Warning ──(remaining == 0)──► Expired
//!   ▲                                   │                             ▲
//!   └────────(activity / extend)────────┘                             │
//!   Active / Warning ───────────────(expire_now)──────────────────────┘
//! ```
//!
//! `Expired` is left only through an explicit `restart()`.
//!
//! # Example
//!
//! ```rust,no_run
//! use ehr_dashboard::session::{ActivityKind, SessionConfig, SessionMonitor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let monitor = SessionMonitor::start(SessionConfig::new(20, 5)?);
//!     let mut events = monitor.subscribe();
//!
//!     monitor.on_user_activity(ActivityKind::KeyPress).await;
//!
//!     while let Ok(event) = events.recv().await {
//!         println!("{:?}", event);
//!     }
//!     Ok(())
//! }
//! ```

pub mod activity;
pub mod error;
pub mod monitor;
pub mod registry;
pub mod state;

pub use activity::{ActivityKind, ExpiryCause, NoopHooks, SessionEvent, SessionHooks};
pub use error::{SessionError, SessionResult};
pub use monitor::SessionMonitor;
pub use registry::{SessionRegistry, EXPIRED_GRACE};
pub use state::{
    format_remaining, SessionConfig, SessionPhase, SessionSnapshot, SessionState, TickOutcome,
    MAX_TIMEOUT_MINUTES,
};
